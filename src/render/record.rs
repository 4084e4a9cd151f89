use serde::Serialize;

use super::{AxisId, FigureSize, LegendEntry, Renderer, TextExtent, estimate_text};
use crate::error::RenderError;
use crate::style::{Color, LegendPosition, LineStyle, Marker};

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RenderCommand {
    BeginFigure {
        size: FigureSize,
        panels: usize,
    },
    BeginPanel {
        index: usize,
    },
    AxisLabel {
        axis: AxisId,
        text: String,
    },
    AxisTicks {
        axis: AxisId,
        locations: Vec<f64>,
        labels: Vec<String>,
    },
    AxisLimits {
        axis: AxisId,
        min: f64,
        max: f64,
    },
    AxisLog {
        axis: AxisId,
        log: bool,
    },
    Line {
        axis: AxisId,
        xs: Vec<f64>,
        ys: Vec<f64>,
        color: String,
        style: LineStyle,
        width: f64,
        label: String,
    },
    Markers {
        axis: AxisId,
        xs: Vec<f64>,
        ys: Vec<f64>,
        color: String,
        shape: Marker,
        size: f64,
        label: String,
    },
    Legend {
        position: LegendPosition,
        columns: usize,
        entries: Vec<LegendEntry>,
    },
    Finish,
}

/// Renderer that only records what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<RenderCommand> {
        self.commands
    }
}

impl Renderer for RecordingRenderer {
    fn begin_figure(&mut self, size: FigureSize, panels: usize) {
        self.commands.push(RenderCommand::BeginFigure { size, panels });
    }

    fn begin_panel(&mut self, index: usize) {
        self.commands.push(RenderCommand::BeginPanel { index });
    }

    fn set_axis_label(&mut self, axis: AxisId, text: &str) {
        self.commands.push(RenderCommand::AxisLabel {
            axis,
            text: text.to_string(),
        });
    }

    fn set_axis_ticks(&mut self, axis: AxisId, locations: &[f64], labels: &[String]) {
        self.commands.push(RenderCommand::AxisTicks {
            axis,
            locations: locations.to_vec(),
            labels: labels.to_vec(),
        });
    }

    fn set_axis_limits(&mut self, axis: AxisId, min: f64, max: f64) {
        self.commands.push(RenderCommand::AxisLimits { axis, min, max });
    }

    fn set_axis_log(&mut self, axis: AxisId, log: bool) {
        self.commands.push(RenderCommand::AxisLog { axis, log });
    }

    fn draw_line(
        &mut self,
        axis: AxisId,
        xs: &[f64],
        ys: &[f64],
        color: &Color,
        style: LineStyle,
        width: f64,
        label: &str,
    ) {
        self.commands.push(RenderCommand::Line {
            axis,
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            color: color.hex().to_string(),
            style,
            width,
            label: label.to_string(),
        });
    }

    fn draw_markers(
        &mut self,
        axis: AxisId,
        xs: &[f64],
        ys: &[f64],
        color: &Color,
        shape: Marker,
        size: f64,
        label: &str,
    ) {
        self.commands.push(RenderCommand::Markers {
            axis,
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            color: color.hex().to_string(),
            shape,
            size,
            label: label.to_string(),
        });
    }

    fn set_legend(&mut self, position: LegendPosition, columns: usize, entries: &[LegendEntry]) {
        self.commands.push(RenderCommand::Legend {
            position,
            columns,
            entries: entries.to_vec(),
        });
    }

    fn measure_text(&self, text: &str, font_size: f64) -> TextExtent {
        estimate_text(text, font_size)
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.commands.push(RenderCommand::Finish);
        Ok(())
    }
}

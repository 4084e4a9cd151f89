//! Renderer backed by charming: one grid per panel, rendered to PNG or SVG

use std::path::{Path, PathBuf};

use charming::{
    Chart, ImageRenderer,
    component::{Axis, Grid, Legend},
    element::{
        AxisLabel, AxisLine, AxisType, Color as ChartColor, ItemStyle, JsFunction,
        LineStyle as ChartLineStyle, LineStyleType, NameLocation, Orient, SplitLine, Symbol,
        TextStyle,
    },
    renderer::ImageFormat,
    series::{Line, Scatter},
};
use tracing::debug;

use super::OutputFormat;
use super::colors::{
    COLOR_AXIS, COLOR_BACKGROUND, COLOR_GRID, COLOR_TEXT, FONT_LEGEND, FONT_TICK, FONT_TITLE,
    PIXEL_RATIO,
};
use crate::error::RenderError;
use crate::layout;
use crate::render::{AxisId, FigureSize, LegendEntry, Renderer, TextExtent, estimate_text};
use crate::style::{Color, LegendPosition, LineStyle, Marker};

/// Ticks and limits collected for one axis.
///
/// ECharts places linear ticks on multiples of `interval` and adds the two
/// extent ends. Plotted coordinates are shifted by [`AxisState::origin`] so
/// those multiples fall on the computed interior ticks, and the extent is
/// pinned to the outer ticks.
#[derive(Debug, Clone, Default)]
struct AxisState {
    title: String,
    locations: Vec<f64>,
    labels: Vec<String>,
    limits: Option<(f64, f64)>,
    log: bool,
}

impl AxisState {
    fn linear_ticks(&self) -> bool {
        !self.log && self.locations.len() > 1
    }

    /// Grid spacing; clamped outer gaps are never wider than it
    fn interval(&self) -> Option<f64> {
        if !self.linear_ticks() {
            return None;
        }
        self.locations.windows(2).map(|w| w[1] - w[0]).reduce(f64::max)
    }

    /// Tick moved to zero in plotted coordinates
    fn origin(&self) -> f64 {
        if self.log {
            return 0.0;
        }
        match self.locations.as_slice() {
            [_, anchor, _, ..] => *anchor,
            [first, ..] => *first,
            [] => 0.0,
        }
    }

    /// Extent in plotted coordinates
    fn extent(&self) -> Option<(f64, f64)> {
        let origin = self.origin();
        match (self.locations.first(), self.locations.last()) {
            (Some(&first), Some(&last)) if self.linear_ticks() => {
                Some((first - origin, last - origin))
            }
            _ => self.limits.map(|(min, max)| (min - origin, max - origin)),
        }
    }

    fn shift(&self, values: &[f64]) -> Vec<f64> {
        let origin = self.origin();
        values.iter().map(|v| v - origin).collect()
    }

    fn label_formatter(&self) -> Option<JsFunction> {
        self.label_lookup()
            .map(|body| JsFunction::new_with_args("value", &body))
    }

    /// Body of a JS formatter mapping a plotted value to the label of the nearest tick
    fn label_lookup(&self) -> Option<String> {
        if self.labels.is_empty() || self.labels.len() != self.locations.len() {
            return None;
        }
        let ticks: Vec<(f64, &str)> = self
            .shift(&self.locations)
            .into_iter()
            .zip(self.labels.iter().map(String::as_str))
            .collect();
        let table = serde_json::to_string(&ticks).ok()?;
        let tolerance = self.interval().map_or(0.0, |i| i * LABEL_MATCH_TOLERANCE);
        let relative = LABEL_MATCH_TOLERANCE;
        let body = format!(
            "var ticks = {table}; var best = ''; var gap = Infinity; \
             for (var i = 0; i < ticks.length; i++) {{ \
             var d = Math.abs(ticks[i][0] - value); \
             if (d < gap) {{ gap = d; best = ticks[i][1]; }} }} \
             return gap <= {tolerance:e} + {relative:e} * Math.abs(value) ? best : '';"
        );
        Some(body)
    }
}

/// Fraction of the tick spacing within which a value takes a tick's label
const LABEL_MATCH_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
enum Mark {
    Line { style: LineStyle, width: f64 },
    Markers { shape: Marker, size: f64 },
}

/// One line or marker set waiting for its axis indices
#[derive(Debug, Clone)]
struct Trace {
    axis: AxisId,
    xs: Vec<f64>,
    ys: Vec<f64>,
    color: String,
    label: String,
    mark: Mark,
}

#[derive(Debug, Clone, Default)]
struct PanelState {
    independent: AxisState,
    primary: Option<AxisState>,
    secondary: Option<AxisState>,
    traces: Vec<Trace>,
}

/// Collects the drawing and saves it as one chart on [`Renderer::finish`]
#[derive(Debug)]
pub struct EchartsRenderer {
    path: PathBuf,
    format: OutputFormat,
    size: FigureSize,
    panels: Vec<PanelState>,
    legend: Vec<LegendEntry>,
    legend_place: Option<(LegendPosition, usize)>,
}

impl EchartsRenderer {
    /// Renderer writing to `path`; the extension selects PNG or SVG
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let path = path.into();
        let format = OutputFormat::from_path(&path)?;
        Ok(Self {
            path,
            format,
            size: FigureSize {
                width: layout::MIN_WIDTH,
                height: layout::MIN_PANEL_HEIGHT,
            },
            panels: Vec::new(),
            legend: Vec::new(),
            legend_place: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn axis_mut(&mut self, axis: AxisId) -> Option<&mut AxisState> {
        let panel = self.panels.last_mut()?;
        Some(match axis {
            AxisId::Independent => &mut panel.independent,
            AxisId::Primary => panel.primary.get_or_insert_with(AxisState::default),
            AxisId::Secondary => panel.secondary.get_or_insert_with(AxisState::default),
        })
    }

    fn push_trace(&mut self, trace: Trace) {
        if let Some(panel) = self.panels.last_mut() {
            panel.traces.push(trace);
        }
    }

    /// Assemble the collected panels into one chart
    fn build_chart(&self) -> Chart {
        let bands = layout::panel_bands(self.size, self.panels.len());
        let height = f64::from(self.size.height);
        let last = self.panels.len().saturating_sub(1);

        let mut chart = Chart::new().background_color(ChartColor::Value(COLOR_BACKGROUND.to_string()));
        let mut y_index: u32 = 0;

        for (i, (panel, (top, band))) in self.panels.iter().zip(bands).enumerate() {
            let grid_index = i as u32;
            chart = chart.grid(
                Grid::new()
                    .left("6%")
                    .right(if panel.secondary.is_some() { "6%" } else { "3%" })
                    .top(percent(top, height))
                    .height(percent(band, height))
                    .contain_label(true),
            );

            // Panels share the independent axis; only the bottom one is labeled
            let independent = value_axis(&panel.independent, grid_index, AxisKind::Independent { labeled: i == last });
            chart = chart.x_axis(independent);

            let primary_index = y_index;
            let primary = panel.primary.clone().unwrap_or_default();
            chart = chart.y_axis(value_axis(&primary, grid_index, AxisKind::Dependent));
            y_index += 1;

            let secondary_index = match &panel.secondary {
                Some(secondary) => {
                    chart = chart.y_axis(value_axis(secondary, grid_index, AxisKind::Dependent));
                    y_index += 1;
                    Some(y_index - 1)
                }
                None => None,
            };

            for trace in &panel.traces {
                let (y_axis, y_state) = match (trace.axis, &panel.secondary) {
                    (AxisId::Secondary, Some(secondary)) => {
                        (secondary_index.unwrap_or(primary_index), secondary)
                    }
                    _ => (primary_index, &primary),
                };
                let data = points(
                    &panel.independent.shift(&trace.xs),
                    &y_state.shift(&trace.ys),
                );
                chart = match trace.mark {
                    Mark::Line { style, width } => chart.series(
                        Line::new()
                            .name(&trace.label)
                            .data(data)
                            .x_axis_index(grid_index)
                            .y_axis_index(y_axis)
                            .show_symbol(false)
                            .line_style(
                                ChartLineStyle::new()
                                    .width(width * PIXEL_RATIO)
                                    .type_(line_type(style))
                                    .color(trace.color.as_str()),
                            )
                            .item_style(ItemStyle::new().color(trace.color.as_str())),
                    ),
                    Mark::Markers { shape, size } => chart.series(
                        Scatter::new()
                            .name(&trace.label)
                            .data(data)
                            .x_axis_index(grid_index)
                            .y_axis_index(y_axis)
                            .symbol(symbol(shape))
                            .symbol_size(size * PIXEL_RATIO)
                            .item_style(ItemStyle::new().color(trace.color.as_str())),
                    ),
                };
            }
        }

        if let Some((position, columns)) = self.legend_place
            && !self.legend.is_empty()
        {
            let names: Vec<String> = self.legend.iter().map(|e| e.label.clone()).collect();
            chart = chart.legend(place_legend(
                Legend::new()
                    .data(names)
                    .item_gap(16)
                    .text_style(TextStyle::new().color(COLOR_TEXT).font_size(FONT_LEGEND * PIXEL_RATIO)),
                position,
                columns,
            ));
        }
        chart
    }
}

enum AxisKind {
    Independent { labeled: bool },
    Dependent,
}

fn value_axis(state: &AxisState, grid_index: u32, kind: AxisKind) -> Axis {
    let mut axis = Axis::new()
        .type_(if state.log { AxisType::Log } else { AxisType::Value })
        .grid_index(grid_index)
        .axis_line(AxisLine::new().line_style(ChartLineStyle::new().color(COLOR_AXIS)))
        .split_line(SplitLine::new().line_style(ChartLineStyle::new().width(0.5).color(COLOR_GRID)));

    if let Some((min, max)) = state.extent() {
        axis = axis.min(min).max(max);
    }
    if let Some(interval) = state.interval() {
        axis = axis.interval(interval);
    }

    let mut labels = AxisLabel::new().color(COLOR_TEXT).font_size(FONT_TICK * PIXEL_RATIO);
    if let Some(formatter) = state.label_formatter() {
        labels = labels.formatter(formatter);
    }
    let title_style = TextStyle::new().color(COLOR_TEXT).font_size(FONT_TITLE * PIXEL_RATIO);
    match kind {
        AxisKind::Independent { labeled: false } => axis.axis_label(AxisLabel::new().show(false)),
        AxisKind::Independent { labeled: true } => axis
            .axis_label(labels)
            .name(state.title.as_str())
            .name_location(NameLocation::Middle)
            .name_gap(FONT_TITLE * PIXEL_RATIO * 2.5)
            .name_text_style(title_style),
        AxisKind::Dependent => axis
            .axis_label(labels)
            .name(state.title.as_str())
            .name_location(NameLocation::Middle)
            .name_gap(FONT_TITLE * PIXEL_RATIO * 4.0)
            .name_text_style(title_style),
    }
}

fn place_legend(legend: Legend, position: LegendPosition, columns: usize) -> Legend {
    let legend = if columns <= 1 {
        legend.orient(Orient::Vertical)
    } else {
        legend.orient(Orient::Horizontal)
    };
    match position {
        LegendPosition::UpperLeft => legend.left("8%").top("3%"),
        LegendPosition::UpperRight | LegendPosition::Hidden => legend.right("8%").top("3%"),
        LegendPosition::LowerLeft => legend.left("8%").bottom("10%"),
        LegendPosition::LowerRight => legend.right("8%").bottom("10%"),
        LegendPosition::Top => legend.left("center").top("1%"),
        LegendPosition::Bottom => legend.left("center").bottom("1%"),
    }
}

fn percent(value: f64, total: f64) -> String {
    format!("{:.2}%", value / total * 100.0)
}

fn line_type(style: LineStyle) -> LineStyleType {
    match style {
        LineStyle::Solid => LineStyleType::Solid,
        LineStyle::Dashed => LineStyleType::Dashed,
        LineStyle::Dotted => LineStyleType::Dotted,
    }
}

fn symbol(shape: Marker) -> Symbol {
    match shape {
        Marker::Circle => Symbol::Circle,
        Marker::Square => Symbol::Rect,
        Marker::Triangle => Symbol::Triangle,
        Marker::Diamond => Symbol::Diamond,
    }
}

fn points(xs: &[f64], ys: &[f64]) -> Vec<Vec<f64>> {
    xs.iter().zip(ys).map(|(&x, &y)| vec![x, y]).collect()
}

impl Renderer for EchartsRenderer {
    fn begin_figure(&mut self, size: FigureSize, panels: usize) {
        self.size = size;
        self.panels = Vec::with_capacity(panels);
        self.legend.clear();
        self.legend_place = None;
    }

    fn begin_panel(&mut self, _index: usize) {
        self.panels.push(PanelState::default());
    }

    fn set_axis_label(&mut self, axis: AxisId, text: &str) {
        if let Some(state) = self.axis_mut(axis) {
            state.title = text.to_string();
        }
    }

    fn set_axis_ticks(&mut self, axis: AxisId, locations: &[f64], labels: &[String]) {
        if let Some(state) = self.axis_mut(axis) {
            state.locations = locations.to_vec();
            state.labels = labels.to_vec();
        }
    }

    fn set_axis_limits(&mut self, axis: AxisId, min: f64, max: f64) {
        if let Some(state) = self.axis_mut(axis) {
            state.limits = Some((min, max));
        }
    }

    fn set_axis_log(&mut self, axis: AxisId, log: bool) {
        if let Some(state) = self.axis_mut(axis) {
            state.log = log;
        }
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
        self.push_trace(Trace {
            axis,
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            color: color.hex().to_string(),
            label: label.to_string(),
            mark: Mark::Line { style, width },
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
        self.push_trace(Trace {
            axis,
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            color: color.hex().to_string(),
            label: label.to_string(),
            mark: Mark::Markers { shape, size },
        });
    }

    fn set_legend(&mut self, position: LegendPosition, columns: usize, entries: &[LegendEntry]) {
        // One legend per chart: the first panel's placement wins
        self.legend_place.get_or_insert((position, columns));
        for entry in entries {
            if !self.legend.iter().any(|e| e.label == entry.label) {
                self.legend.push(entry.clone());
            }
        }
    }

    fn measure_text(&self, text: &str, font_size: f64) -> TextExtent {
        estimate_text(text, font_size)
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        let chart = self.build_chart();
        let width = (f64::from(self.size.width) * PIXEL_RATIO) as u32;
        let height = (f64::from(self.size.height) * PIXEL_RATIO) as u32;
        debug!(
            path = %self.path.display(),
            width,
            height,
            panels = self.panels.len(),
            "saving chart"
        );

        let mut renderer = ImageRenderer::new(width, height);
        let saved = match self.format {
            OutputFormat::Png => renderer.save_format(ImageFormat::Png, &chart, &self.path),
            OutputFormat::Svg => renderer.save(&chart, &self.path),
        };
        saved.map_err(|e| RenderError::Backend(e.to_string()))
    }
}

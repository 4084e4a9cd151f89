//! Rendering backend contract

mod record;

pub use record::{RecordingRenderer, RenderCommand};

use serde::Serialize;

use crate::error::RenderError;
use crate::style::{Color, LegendPosition, LineStyle, Marker};

/// Axis a drawing call refers to within the current panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisId {
    Independent,
    Primary,
    Secondary,
}

/// Rendered size of a piece of text, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Output image size, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

/// One legend row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub line: Option<LineStyle>,
    pub marker: Option<Marker>,
}

/// Drawing surface fed by [`crate::Figure::draw`].
///
/// Calls arrive as: `begin_figure`, then per panel `begin_panel` followed by
/// axis setup, lines and markers and the legend, then `finish`. All
/// coordinates are already divided by the axis scale.
pub trait Renderer {
    fn begin_figure(&mut self, size: FigureSize, panels: usize);

    fn begin_panel(&mut self, index: usize);

    fn set_axis_label(&mut self, axis: AxisId, text: &str);

    fn set_axis_ticks(&mut self, axis: AxisId, locations: &[f64], labels: &[String]);

    fn set_axis_limits(&mut self, axis: AxisId, min: f64, max: f64);

    fn set_axis_log(&mut self, axis: AxisId, log: bool);

    #[allow(clippy::too_many_arguments)]
    fn draw_line(
        &mut self,
        axis: AxisId,
        xs: &[f64],
        ys: &[f64],
        color: &Color,
        style: LineStyle,
        width: f64,
        label: &str,
    );

    #[allow(clippy::too_many_arguments)]
    fn draw_markers(
        &mut self,
        axis: AxisId,
        xs: &[f64],
        ys: &[f64],
        color: &Color,
        shape: Marker,
        size: f64,
        label: &str,
    );

    fn set_legend(&mut self, position: LegendPosition, columns: usize, entries: &[LegendEntry]);

    /// Size of `text` at `font_size`; only used for figure sizing
    fn measure_text(&self, text: &str, font_size: f64) -> TextExtent;

    /// Flush the drawing (write the file, for file-backed renderers)
    fn finish(&mut self) -> Result<(), RenderError>;
}

/// Average glyph width relative to the font size
const GLYPH_WIDTH: f64 = 0.6;
/// Line height relative to the font size
const LINE_HEIGHT: f64 = 1.2;

/// Font-size based extent for backends without real text metrics
pub fn estimate_text(text: &str, font_size: f64) -> TextExtent {
    TextExtent {
        width: text.chars().count() as f64 * font_size * GLYPH_WIDTH,
        height: font_size * LINE_HEIGHT,
    }
}

//! Theme colors and font sizes for rendered charts

/// Common colors
pub(super) const COLOR_BACKGROUND: &str = "#0A0A0C"; // Near black
pub(super) const COLOR_TEXT: &str = "#FFFFFF"; // White
pub(super) const COLOR_GRID: &str = "#505050"; // Grid lines
pub(super) const COLOR_AXIS: &str = "#A0A0A0"; // Axis lines and ticks

/// Output pixels per layout pixel (2x for Retina quality)
pub(super) const PIXEL_RATIO: f64 = 2.0;

/// Font sizes in layout pixels, multiplied by `PIXEL_RATIO` when rendered
pub(super) const FONT_TICK: f64 = 12.0;
pub(super) const FONT_TITLE: f64 = 13.0;
pub(super) const FONT_LEGEND: f64 = 12.0;

//! Series: one data source plus its visual treatment and interpolation curve

mod interpolate;

pub use interpolate::CURVE_SAMPLES;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::SeriesError;
use crate::render::{AxisId, Renderer};
use crate::source::DataSource;
use crate::style::{Color, LineStyle, Marker};

const DEFAULT_LINE_WIDTH: f64 = 2.0;
const DEFAULT_MARKER_SIZE: f64 = 8.0;

/// How raw points are connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Points only, no connecting line
    None,
    /// Straight segments between raw points
    #[default]
    Straight,
    /// Post steps between raw points
    Step,
    /// Natural cubic spline sampled on a uniform grid
    Cubic,
    /// Least-squares regression line
    Linreg,
}

impl Interpolation {
    /// Minimum number of raw points the mode needs
    pub fn required_points(self) -> usize {
        match self {
            Interpolation::Cubic => 4,
            Interpolation::Linreg => 2,
            _ => 1,
        }
    }

    /// Whether the mode produces a sampled curve
    pub fn has_curve(self) -> bool {
        matches!(self, Interpolation::Cubic | Interpolation::Linreg)
    }
}

/// Divide every value by `divisor`
pub fn scale_values(values: &[f64], divisor: f64) -> Vec<f64> {
    values.iter().map(|v| v / divisor).collect()
}

/// Coordinates after the owning panel's and figure's divisors are applied
#[derive(Debug, Clone, Default)]
struct Scaled {
    independent: Vec<f64>,
    dependent: Vec<f64>,
    curve_independent: Vec<f64>,
    curve_dependent: Vec<f64>,
}

/// A drawable data series.
///
/// Every setter re-validates and recomputes the curve; a failing setter
/// leaves the series exactly as it was.
#[derive(Debug, Clone)]
pub struct Series {
    source: Box<dyn DataSource>,
    label: String,
    color: Color,
    marker: Option<Marker>,
    line_style: Option<LineStyle>,
    line_width: f64,
    marker_size: f64,
    interpolation: Interpolation,
    secondary_axis: bool,
    curve: Option<(Vec<f64>, Vec<f64>)>,
    independent_divisor: f64,
    dependent_divisor: f64,
    scaled: Scaled,
}

impl Series {
    /// Straight solid line without markers
    pub fn new(source: impl DataSource + 'static, label: impl Into<String>) -> Result<Self, SeriesError> {
        Self::builder(source).label(label).build()
    }

    pub fn builder(source: impl DataSource + 'static) -> SeriesBuilder {
        SeriesBuilder::new(Box::new(source))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn marker(&self) -> Option<Marker> {
        self.marker
    }

    pub fn line_style(&self) -> Option<LineStyle> {
        self.line_style
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn marker_size(&self) -> f64 {
        self.marker_size
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn is_secondary(&self) -> bool {
        self.secondary_axis
    }

    /// Dependent axis this series is plotted against
    pub fn dependent_axis(&self) -> AxisId {
        if self.secondary_axis {
            AxisId::Secondary
        } else {
            AxisId::Primary
        }
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    /// Raw independent values inside the source's bounds
    pub fn independent_values(&self) -> &[f64] {
        // A built series always has a populated source
        self.source.independent_values().unwrap_or(&[])
    }

    /// Raw dependent values inside the source's bounds
    pub fn dependent_values(&self) -> &[f64] {
        self.source.dependent_values().unwrap_or(&[])
    }

    /// Curve sample positions (`Cubic` and `Linreg` only)
    pub fn interpolated_independent(&self) -> Option<&[f64]> {
        self.curve.as_ref().map(|(x, _)| x.as_slice())
    }

    /// Curve sample values (`Cubic` and `Linreg` only)
    pub fn interpolated_dependent(&self) -> Option<&[f64]> {
        self.curve.as_ref().map(|(_, y)| y.as_slice())
    }

    /// Raw dependent values followed by curve values, as fed to the tick engine
    pub fn dependent_extent(&self) -> Vec<f64> {
        let mut values = self.dependent_values().to_vec();
        if let Some(curve) = self.interpolated_dependent() {
            values.extend_from_slice(curve);
        }
        values
    }

    /// Line actually drawn, if any
    pub fn effective_line(&self) -> Option<LineStyle> {
        match self.interpolation {
            Interpolation::None => None,
            Interpolation::Straight | Interpolation::Step => self.line_style,
            Interpolation::Cubic | Interpolation::Linreg => {
                Some(self.line_style.unwrap_or(LineStyle::Solid))
            }
        }
    }

    pub fn divisors(&self) -> (f64, f64) {
        (self.independent_divisor, self.dependent_divisor)
    }

    pub fn scaled_independent(&self) -> &[f64] {
        &self.scaled.independent
    }

    pub fn scaled_dependent(&self) -> &[f64] {
        &self.scaled.dependent
    }

    pub fn scaled_interpolated_independent(&self) -> &[f64] {
        &self.scaled.curve_independent
    }

    pub fn scaled_interpolated_dependent(&self) -> &[f64] {
        &self.scaled.curve_dependent
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) -> Result<(), SeriesError> {
        let previous = std::mem::replace(&mut self.interpolation, interpolation);
        self.rebuild().inspect_err(|_| self.interpolation = previous)
    }

    pub fn set_line_style(&mut self, line_style: Option<LineStyle>) -> Result<(), SeriesError> {
        let previous = std::mem::replace(&mut self.line_style, line_style);
        self.rebuild().inspect_err(|_| self.line_style = previous)
    }

    pub fn set_marker(&mut self, marker: Option<Marker>) -> Result<(), SeriesError> {
        let previous = std::mem::replace(&mut self.marker, marker);
        self.rebuild().inspect_err(|_| self.marker = previous)
    }

    /// Re-bound the data source; the old bounds come back if the result is unusable
    pub fn set_bounds(&mut self, min: Option<f64>, max: Option<f64>) -> Result<(), SeriesError> {
        let (old_min, old_max) = self.source.bounds();
        self.source.set_bounds(min, max)?;
        if let Err(err) = self.rebuild() {
            self.source.set_bounds(old_min, old_max)?;
            self.rebuild()?;
            return Err(err);
        }
        Ok(())
    }

    pub fn set_secondary_axis(&mut self, secondary: bool) {
        self.secondary_axis = secondary;
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Replace both divisors and recompute scaled coordinates
    pub fn set_scaling(&mut self, independent: f64, dependent: f64) {
        self.independent_divisor = independent;
        self.dependent_divisor = dependent;
        self.apply_scaling();
    }

    pub(crate) fn set_independent_divisor(&mut self, divisor: f64) {
        self.independent_divisor = divisor;
        self.apply_scaling();
    }

    pub(crate) fn set_dependent_divisor(&mut self, divisor: f64) {
        self.dependent_divisor = divisor;
        self.apply_scaling();
    }

    /// Check the configuration and recompute the curve
    fn rebuild(&mut self) -> Result<(), SeriesError> {
        let x = self.source.independent_values()?;
        let y = self.source.dependent_values()?;

        let required = self.interpolation.required_points();
        if x.len() < required {
            return Err(SeriesError::InsufficientPoints {
                mode: self.interpolation,
                required,
                actual: x.len(),
            });
        }
        if self.marker.is_none() && self.effective_line().is_none() {
            return Err(SeriesError::Unplottable {
                label: self.label.clone(),
            });
        }

        self.curve = match self.interpolation {
            Interpolation::Cubic => Some(interpolate::cubic_curve(x, y)),
            Interpolation::Linreg => Some(interpolate::linreg_curve(x, y)),
            _ => None,
        };
        trace!(label = %self.label, mode = ?self.interpolation, points = x.len(), "series rebuilt");
        self.apply_scaling();
        Ok(())
    }

    fn apply_scaling(&mut self) {
        let (curve_independent, curve_dependent) = match &self.curve {
            Some((x, y)) => (
                scale_values(x, self.independent_divisor),
                scale_values(y, self.dependent_divisor),
            ),
            None => (Vec::new(), Vec::new()),
        };
        self.scaled = Scaled {
            independent: scale_values(self.independent_values(), self.independent_divisor),
            dependent: scale_values(self.dependent_values(), self.dependent_divisor),
            curve_independent,
            curve_dependent,
        };
    }

    /// Emit this series' line and markers in scaled coordinates
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let axis = self.dependent_axis();
        if let Some(style) = self.effective_line() {
            let (xs, ys) = match self.interpolation {
                Interpolation::Step => step_points(&self.scaled.independent, &self.scaled.dependent),
                Interpolation::Cubic | Interpolation::Linreg => (
                    self.scaled.curve_independent.clone(),
                    self.scaled.curve_dependent.clone(),
                ),
                _ => (self.scaled.independent.clone(), self.scaled.dependent.clone()),
            };
            renderer.draw_line(axis, &xs, &ys, &self.color, style, self.line_width, &self.label);
        }
        if let Some(shape) = self.marker {
            renderer.draw_markers(
                axis,
                &self.scaled.independent,
                &self.scaled.dependent,
                &self.color,
                shape,
                self.marker_size,
                &self.label,
            );
        }
    }
}

/// Expand points into a post-step polyline
fn step_points(xs: &[f64], ys: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut step_x = Vec::with_capacity(xs.len() * 2);
    let mut step_y = Vec::with_capacity(ys.len() * 2);
    for (i, (&x, &y)) in xs.iter().zip(ys).enumerate() {
        if i > 0 {
            step_x.push(x);
            step_y.push(ys[i - 1]);
        }
        step_x.push(x);
        step_y.push(y);
    }
    (step_x, step_y)
}

/// Builder collecting a series' visual treatment before validation
#[derive(Debug)]
pub struct SeriesBuilder {
    source: Box<dyn DataSource>,
    label: String,
    color: Color,
    marker: Option<Marker>,
    line_style: Option<LineStyle>,
    line_width: f64,
    marker_size: f64,
    interpolation: Interpolation,
    secondary_axis: bool,
}

impl SeriesBuilder {
    fn new(source: Box<dyn DataSource>) -> Self {
        Self {
            source,
            label: String::new(),
            color: Color::default(),
            marker: None,
            line_style: Some(LineStyle::Solid),
            line_width: DEFAULT_LINE_WIDTH,
            marker_size: DEFAULT_MARKER_SIZE,
            interpolation: Interpolation::default(),
            secondary_axis: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn marker(mut self, marker: Option<Marker>) -> Self {
        self.marker = marker;
        self
    }

    pub fn line_style(mut self, line_style: Option<LineStyle>) -> Self {
        self.line_style = line_style;
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn secondary_axis(mut self, secondary: bool) -> Self {
        self.secondary_axis = secondary;
        self
    }

    /// Validate and compute the curve
    pub fn build(self) -> Result<Series, SeriesError> {
        let mut series = Series {
            source: self.source,
            label: self.label,
            color: self.color,
            marker: self.marker,
            line_style: self.line_style,
            line_width: self.line_width,
            marker_size: self.marker_size,
            interpolation: self.interpolation,
            secondary_axis: self.secondary_axis,
            curve: None,
            independent_divisor: 1.0,
            dependent_divisor: 1.0,
            scaled: Scaled::default(),
        };
        series.rebuild()?;
        Ok(series)
    }
}

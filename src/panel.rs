//! Panel: series sharing a primary and an optional secondary dependent axis

use tracing::debug;

use crate::error::{ChartError, ChartResult, SeriesError, SeriesRejection};
use crate::render::{AxisId, LegendEntry, Renderer};
use crate::series::Series;
use crate::style::LegendPosition;
use crate::ticks::{self, TickResult};

/// Compose an axis title as `label (prefix+units)`
pub fn axis_title(label: &str, prefix: &str, units: &str) -> String {
    let unit = format!("{prefix}{units}");
    if unit.is_empty() {
        label.to_string()
    } else {
        format!("{label} ({unit})").trim_start().to_string()
    }
}

/// One chart panel.
///
/// Every successful mutation recomputes the dependent-axis ticks and pushes
/// the resulting divisors into the series. When both axes are populated on a
/// linear panel their tick counts are equalized so the grid lines coincide.
#[derive(Debug, Clone)]
pub struct Panel {
    series: Vec<Series>,
    primary_label: String,
    primary_units: String,
    secondary_label: String,
    secondary_units: String,
    log_dependent_axis: bool,
    legend_position: LegendPosition,
    legend_columns: usize,
    primary_ticks: Option<TickResult>,
    secondary_ticks: Option<TickResult>,
    independent_divisor: f64,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            primary_label: String::new(),
            primary_units: String::new(),
            secondary_label: String::new(),
            secondary_units: String::new(),
            log_dependent_axis: false,
            legend_position: LegendPosition::default(),
            legend_columns: 1,
            primary_ticks: None,
            secondary_ticks: None,
            independent_divisor: 1.0,
        }
    }
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn primary_ticks(&self) -> Option<&TickResult> {
        self.primary_ticks.as_ref()
    }

    pub fn secondary_ticks(&self) -> Option<&TickResult> {
        self.secondary_ticks.as_ref()
    }

    pub fn is_log(&self) -> bool {
        self.log_dependent_axis
    }

    pub fn legend_position(&self) -> LegendPosition {
        self.legend_position
    }

    pub fn legend_columns(&self) -> usize {
        self.legend_columns
    }

    pub fn set_primary_axis(&mut self, label: impl Into<String>, units: impl Into<String>) {
        self.primary_label = label.into();
        self.primary_units = units.into();
    }

    pub fn set_secondary_axis(&mut self, label: impl Into<String>, units: impl Into<String>) {
        self.secondary_label = label.into();
        self.secondary_units = units.into();
    }

    pub fn set_legend(&mut self, position: LegendPosition, columns: usize) {
        self.legend_position = position;
        self.legend_columns = columns.max(1);
    }

    /// Title of a dependent axis including the engineering prefix of its ticks
    pub fn axis_title(&self, axis: AxisId) -> String {
        match axis {
            AxisId::Secondary => axis_title(
                &self.secondary_label,
                self.secondary_ticks.as_ref().map_or("", |t| t.unit_prefix.as_str()),
                &self.secondary_units,
            ),
            _ => axis_title(
                &self.primary_label,
                self.primary_ticks.as_ref().map_or("", |t| t.unit_prefix.as_str()),
                &self.primary_units,
            ),
        }
    }

    pub fn add_series(&mut self, series: Series) -> ChartResult<()> {
        let index = self.series.len();
        self.insert_series(index, series)
    }

    /// Insert at `index`, shifting later series (and their draw order) back
    pub fn insert_series(&mut self, index: usize, mut series: Series) -> ChartResult<()> {
        if index > self.series.len() {
            return Err(ChartError::IndexOutOfRange {
                param: "series",
                index,
                len: self.series.len(),
            });
        }
        check_series(self.log_dependent_axis, index, &series)?;
        series.set_independent_divisor(self.independent_divisor);
        self.series.insert(index, series);
        if let Err(err) = self.recompute() {
            self.series.remove(index);
            self.recompute()?;
            return Err(err);
        }
        Ok(())
    }

    pub fn remove_series(&mut self, index: usize) -> ChartResult<Series> {
        if index >= self.series.len() {
            return Err(ChartError::IndexOutOfRange {
                param: "series",
                index,
                len: self.series.len(),
            });
        }
        let removed = self.series.remove(index);
        self.recompute()?;
        Ok(removed)
    }

    /// Mutate one series in place; if the change fails or makes the series
    /// unacceptable for this panel, the series is restored.
    pub fn update_series<F>(&mut self, index: usize, update: F) -> ChartResult<()>
    where
        F: FnOnce(&mut Series) -> Result<(), SeriesError>,
    {
        let snapshot = self
            .series
            .get(index)
            .cloned()
            .ok_or(ChartError::IndexOutOfRange {
                param: "series",
                index,
                len: self.series.len(),
            })?;

        if let Err(err) = self.apply_update(index, update) {
            self.series[index] = snapshot;
            self.recompute()?;
            return Err(err);
        }
        Ok(())
    }

    fn apply_update<F>(&mut self, index: usize, update: F) -> ChartResult<()>
    where
        F: FnOnce(&mut Series) -> Result<(), SeriesError>,
    {
        update(&mut self.series[index])?;
        check_series(self.log_dependent_axis, index, &self.series[index])?;
        self.recompute()
    }

    /// Switch the dependent axes between linear and logarithmic
    pub fn set_log_dependent_axis(&mut self, log: bool) -> ChartResult<()> {
        if log {
            for (index, series) in self.series.iter().enumerate() {
                check_series(true, index, series)?;
            }
        }
        let previous = std::mem::replace(&mut self.log_dependent_axis, log);
        if let Err(err) = self.recompute() {
            self.log_dependent_axis = previous;
            self.recompute()?;
            return Err(err);
        }
        Ok(())
    }

    /// Legend rows in series order, unlabeled series skipped
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.series
            .iter()
            .filter(|s| !s.label().is_empty())
            .map(|s| LegendEntry {
                label: s.label().to_string(),
                color: s.color().hex().to_string(),
                line: s.effective_line(),
                marker: s.marker(),
            })
            .collect()
    }

    /// Raw independent values of every series, in series order
    pub(crate) fn independent_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series
            .iter()
            .flat_map(|s| s.independent_values().iter().copied())
    }

    pub(crate) fn apply_independent_scale(&mut self, divisor: f64) {
        self.independent_divisor = divisor;
        for series in &mut self.series {
            series.set_independent_divisor(divisor);
        }
    }

    fn recompute(&mut self) -> ChartResult<()> {
        let primary = self.dependent_ticks(false)?;
        let secondary = self.dependent_ticks(true)?;

        let (primary, secondary) = match (primary, secondary) {
            (Some(p), Some(s)) if !self.log_dependent_axis => {
                let intervals = p.len().max(s.len()) - 1;
                debug!(
                    primary = p.len(),
                    secondary = s.len(),
                    intervals,
                    "equalizing dependent ticks"
                );
                (Some(p.resampled(intervals)), Some(s.resampled(intervals)))
            }
            other => other,
        };

        let primary_divisor = primary.as_ref().map_or(1.0, |t| t.scale);
        let secondary_divisor = secondary.as_ref().map_or(1.0, |t| t.scale);
        for series in &mut self.series {
            let divisor = if series.is_secondary() {
                secondary_divisor
            } else {
                primary_divisor
            };
            series.set_dependent_divisor(divisor);
        }

        debug!(
            series = self.series.len(),
            primary = primary.as_ref().map(TickResult::len),
            secondary = secondary.as_ref().map(TickResult::len),
            log = self.log_dependent_axis,
            "panel recomputed"
        );
        self.primary_ticks = primary;
        self.secondary_ticks = secondary;
        Ok(())
    }

    fn dependent_ticks(&self, secondary: bool) -> ChartResult<Option<TickResult>> {
        let values: Vec<f64> = self
            .series
            .iter()
            .filter(|s| s.is_secondary() == secondary)
            .flat_map(|s| s.dependent_extent())
            .collect();
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(ticks::compute_auto(
            &values,
            false,
            self.log_dependent_axis,
        )?))
    }

    /// Dependent axes, series and legend; the independent axis is set by the figure
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for (axis, ticks) in [
            (AxisId::Primary, &self.primary_ticks),
            (AxisId::Secondary, &self.secondary_ticks),
        ] {
            let Some(ticks) = ticks else { continue };
            renderer.set_axis_label(axis, &self.axis_title(axis));
            renderer.set_axis_ticks(axis, &ticks.locations, &ticks.labels);
            renderer.set_axis_limits(axis, ticks.axis_min, ticks.axis_max);
            renderer.set_axis_log(axis, ticks.log);
        }
        for series in &self.series {
            series.draw(renderer);
        }
        if self.legend_position != LegendPosition::Hidden {
            renderer.set_legend(
                self.legend_position,
                self.legend_columns,
                &self.legend_entries(),
            );
        }
    }
}

/// A series is acceptable when its source reports itself complete and, on a
/// log panel, every value it contributes to its axis is positive.
///
/// Building a series already requires populated values, so only providers
/// that override [`crate::source::DataSource::is_complete`] (a source still being filled)
/// are caught by the first check.
fn check_series(log: bool, index: usize, series: &Series) -> ChartResult<()> {
    if !series.source().is_complete() {
        return Err(ChartError::InvalidSeries {
            index,
            reason: SeriesRejection::Incomplete,
        });
    }
    if log && let Some(value) = series.dependent_extent().into_iter().find(|v| *v <= 0.0) {
        return Err(ChartError::InvalidSeries {
            index,
            reason: SeriesRejection::NonPositive {
                axis: series.dependent_axis(),
                value,
            },
        });
    }
    Ok(())
}

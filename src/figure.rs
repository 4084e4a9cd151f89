//! Figure: panels stacked top to bottom over one shared independent axis

use tracing::debug;

use crate::error::{ChartError, ChartResult, PanelRejection, RenderError};
use crate::layout;
use crate::panel::{Panel, axis_title};
use crate::render::{AxisId, FigureSize, Renderer};
use crate::ticks::{self, TickResult};

#[derive(Debug, Clone, Default)]
pub struct Figure {
    panels: Vec<Panel>,
    independent_label: String,
    independent_units: String,
    log_independent_axis: bool,
    independent_ticks: Option<TickResult>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Shared independent-axis ticks, absent while the figure has no panels
    pub fn independent_ticks(&self) -> Option<&TickResult> {
        self.independent_ticks.as_ref()
    }

    pub fn is_log(&self) -> bool {
        self.log_independent_axis
    }

    pub fn set_independent_label(&mut self, label: impl Into<String>, units: impl Into<String>) {
        self.independent_label = label.into();
        self.independent_units = units.into();
    }

    /// Independent axis title including the engineering prefix of its ticks
    pub fn independent_title(&self) -> String {
        axis_title(
            &self.independent_label,
            self.independent_ticks
                .as_ref()
                .map_or("", |t| t.unit_prefix.as_str()),
            &self.independent_units,
        )
    }

    pub fn add_panel(&mut self, panel: Panel) -> ChartResult<()> {
        check_panel(self.log_independent_axis, self.panels.len(), &panel)?;
        self.panels.push(panel);
        if let Err(err) = self.recompute() {
            self.panels.pop();
            self.recompute()?;
            return Err(err);
        }
        Ok(())
    }

    pub fn remove_panel(&mut self, index: usize) -> ChartResult<Panel> {
        if index >= self.panels.len() {
            return Err(ChartError::IndexOutOfRange {
                param: "panel",
                index,
                len: self.panels.len(),
            });
        }
        let mut removed = self.panels.remove(index);
        removed.apply_independent_scale(1.0);
        self.recompute()?;
        Ok(removed)
    }

    /// Mutate one panel in place; the panel is restored if the change fails
    /// or leaves it unacceptable for this figure.
    pub fn update_panel<F>(&mut self, index: usize, update: F) -> ChartResult<()>
    where
        F: FnOnce(&mut Panel) -> ChartResult<()>,
    {
        let snapshot = self
            .panels
            .get(index)
            .cloned()
            .ok_or(ChartError::IndexOutOfRange {
                param: "panel",
                index,
                len: self.panels.len(),
            })?;

        if let Err(err) = self.apply_update(index, update) {
            self.panels[index] = snapshot;
            self.recompute()?;
            return Err(err);
        }
        Ok(())
    }

    fn apply_update<F>(&mut self, index: usize, update: F) -> ChartResult<()>
    where
        F: FnOnce(&mut Panel) -> ChartResult<()>,
    {
        update(&mut self.panels[index])?;
        check_panel(self.log_independent_axis, index, &self.panels[index])?;
        self.recompute()
    }

    /// Switch the shared independent axis between linear and logarithmic
    pub fn set_log_independent_axis(&mut self, log: bool) -> ChartResult<()> {
        if log {
            for (index, panel) in self.panels.iter().enumerate() {
                check_panel(true, index, panel)?;
            }
        }
        let previous = std::mem::replace(&mut self.log_independent_axis, log);
        if let Err(err) = self.recompute() {
            self.log_independent_axis = previous;
            self.recompute()?;
            return Err(err);
        }
        Ok(())
    }

    fn recompute(&mut self) -> ChartResult<()> {
        let values: Vec<f64> = self
            .panels
            .iter()
            .flat_map(|panel| panel.independent_values())
            .collect();

        let ticks = if values.is_empty() {
            None
        } else {
            Some(ticks::compute_auto(&values, true, self.log_independent_axis)?)
        };
        let divisor = ticks.as_ref().map_or(1.0, |t| t.scale);
        for panel in &mut self.panels {
            panel.apply_independent_scale(divisor);
        }

        debug!(
            panels = self.panels.len(),
            values = values.len(),
            ticks = ticks.as_ref().map(TickResult::len),
            divisor,
            "figure recomputed"
        );
        self.independent_ticks = ticks;
        Ok(())
    }

    /// Size the figure from measured text, then draw it
    pub fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), RenderError> {
        let size = layout::figure_size(self, renderer, layout::FONT_SIZE);
        self.draw_sized(renderer, size)
    }

    /// Draw every panel top to bottom, then let the renderer finish
    pub fn draw_sized(&self, renderer: &mut dyn Renderer, size: FigureSize) -> Result<(), RenderError> {
        renderer.begin_figure(size, self.panels.len());
        let title = self.independent_title();
        for (index, panel) in self.panels.iter().enumerate() {
            renderer.begin_panel(index);
            if let Some(ticks) = &self.independent_ticks {
                renderer.set_axis_label(AxisId::Independent, &title);
                renderer.set_axis_ticks(AxisId::Independent, &ticks.locations, &ticks.labels);
                renderer.set_axis_limits(AxisId::Independent, ticks.axis_min, ticks.axis_max);
                renderer.set_axis_log(AxisId::Independent, ticks.log);
            }
            panel.draw(renderer);
        }
        renderer.finish()
    }
}

/// A panel is acceptable when it has a series and, on a log figure, every
/// independent value it holds is positive
fn check_panel(log: bool, index: usize, panel: &Panel) -> ChartResult<()> {
    if panel.is_empty() {
        return Err(ChartError::InvalidPanel {
            index,
            reason: PanelRejection::NoSeries,
        });
    }
    if log {
        for (series, s) in panel.series().iter().enumerate() {
            if let Some(&value) = s.independent_values().iter().find(|v| **v <= 0.0) {
                return Err(ChartError::InvalidPanel {
                    index,
                    reason: PanelRejection::NonPositive { series, value },
                });
            }
        }
    }
    Ok(())
}

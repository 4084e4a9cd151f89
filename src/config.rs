//! JSON chart descriptions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, SeriesError};
use crate::figure::Figure;
use crate::panel::Panel;
use crate::series::{Interpolation, Series};
use crate::source::{Column, DataSource, TableSource, VectorSource};
use crate::style::{Color, LegendPosition, LineStyle, Marker};

/// Whole figure: shared independent axis plus panels top to bottom
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FigureConfig {
    #[serde(default)]
    pub independent_label: String,
    #[serde(default)]
    pub independent_units: String,
    #[serde(default)]
    pub log_independent_axis: bool,
    /// Fixed output size; measured from the labels when absent
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    pub panels: Vec<PanelConfig>,

    /// Directory relative table paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    #[serde(default)]
    pub primary_label: String,
    #[serde(default)]
    pub primary_units: String,
    #[serde(default)]
    pub secondary_label: String,
    #[serde(default)]
    pub secondary_units: String,
    #[serde(default)]
    pub log_dependent_axis: bool,
    #[serde(default)]
    pub legend_position: LegendPosition,
    #[serde(default = "default_legend_columns")]
    pub legend_columns: usize,
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesConfig {
    #[serde(default)]
    pub label: String,
    /// `#RRGGBB` or a palette name; palette color by position when absent
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub marker: Option<Marker>,
    /// `null` draws no line
    #[serde(default = "default_line_style")]
    pub line_style: Option<LineStyle>,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,
    #[serde(default)]
    pub interpolation: Interpolation,
    #[serde(default)]
    pub secondary_axis: bool,
    #[serde(default)]
    pub min_bound: Option<f64>,
    #[serde(default)]
    pub max_bound: Option<f64>,
    #[serde(default)]
    pub independent: Option<Vec<f64>>,
    #[serde(default)]
    pub dependent: Option<Vec<f64>>,
    #[serde(default)]
    pub table: Option<TableConfig>,
}

/// Two columns of a delimited text file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub path: PathBuf,
    pub independent: Column,
    pub dependent: Column,
}

fn default_legend_columns() -> usize {
    1
}

fn default_line_style() -> Option<LineStyle> {
    Some(LineStyle::Solid)
}

fn default_line_width() -> f64 {
    2.0
}

fn default_marker_size() -> f64 {
    8.0
}

impl FigureConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a description file; tables are then resolved next to it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(path = %path.display(), panels = config.panels.len(), "loaded chart description");
        Ok(config)
    }

    /// Build the figure through the validating API
    pub fn build(&self) -> Result<Figure, ConfigError> {
        let mut figure = Figure::new();
        figure.set_independent_label(&self.independent_label, &self.independent_units);
        figure.set_log_independent_axis(self.log_independent_axis)?;

        for (panel_index, panel_config) in self.panels.iter().enumerate() {
            let mut panel = Panel::new();
            panel.set_primary_axis(&panel_config.primary_label, &panel_config.primary_units);
            panel.set_secondary_axis(&panel_config.secondary_label, &panel_config.secondary_units);
            panel.set_legend(panel_config.legend_position, panel_config.legend_columns);
            panel.set_log_dependent_axis(panel_config.log_dependent_axis)?;

            for (series_index, series_config) in panel_config.series.iter().enumerate() {
                let series = self
                    .build_series(series_config, series_index)
                    .map_err(|err| match err {
                        BuildError::Config(err) => err,
                        BuildError::Series(source) => ConfigError::Series {
                            panel: panel_index,
                            series: series_index,
                            source,
                        },
                        BuildError::Ambiguous => ConfigError::AmbiguousData {
                            panel: panel_index,
                            series: series_index,
                        },
                    })?;
                panel.add_series(series)?;
            }
            figure.add_panel(panel)?;
        }
        Ok(figure)
    }

    fn build_series(&self, config: &SeriesConfig, index: usize) -> Result<Series, BuildError> {
        let color = match &config.color {
            Some(text) => Color::parse(text).ok_or_else(|| ConfigError::Color(text.clone()))?,
            None => Color::palette(index),
        };

        match (&config.table, &config.independent, &config.dependent) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(BuildError::Ambiguous),
            (Some(table), None, None) => {
                let path = self.base_dir.join(&table.path);
                let mut source = TableSource::new(path, table.independent.clone(), table.dependent.clone());
                source.set_bounds(config.min_bound, config.max_bound).map_err(SeriesError::from)?;
                source.load().map_err(SeriesError::from)?;
                Ok(styled(source, config, color)?)
            }
            (None, independent, dependent) => {
                let source = VectorSource::with_bounds(
                    independent.clone().unwrap_or_default(),
                    dependent.clone().unwrap_or_default(),
                    config.min_bound,
                    config.max_bound,
                )
                .map_err(SeriesError::from)?;
                Ok(styled(source, config, color)?)
            }
        }
    }
}

/// Series-level failure before panel and series indices are attached
enum BuildError {
    Config(ConfigError),
    Series(SeriesError),
    Ambiguous,
}

impl From<ConfigError> for BuildError {
    fn from(err: ConfigError) -> Self {
        BuildError::Config(err)
    }
}

impl From<SeriesError> for BuildError {
    fn from(err: SeriesError) -> Self {
        BuildError::Series(err)
    }
}

fn styled(
    source: impl DataSource + 'static,
    config: &SeriesConfig,
    color: Color,
) -> Result<Series, SeriesError> {
    Series::builder(source)
        .label(&config.label)
        .color(color)
        .marker(config.marker)
        .line_style(config.line_style)
        .line_width(config.line_width)
        .marker_size(config.marker_size)
        .interpolation(config.interpolation)
        .secondary_axis(config.secondary_axis)
        .build()
}

//! Error types for every layer of the chart model

use std::path::PathBuf;

use thiserror::Error;

use crate::render::AxisId;
use crate::series::Interpolation;

/// Validation errors raised while building or bounding a data source
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{param} must not be empty")]
    Empty { param: &'static str },

    #[error("independent has {independent} values but dependent has {dependent}")]
    LengthMismatch { independent: usize, dependent: usize },

    #[error("independent values must be strictly increasing (index {index})")]
    NotIncreasing { index: usize },

    #[error("{param}[{index}] is not finite")]
    NonFinite { param: &'static str, index: usize },

    #[error("min_bound {min} is greater than max_bound {max}")]
    InvertedBounds { min: f64, max: f64 },

    #[error("no values left inside bounds [{min:?}, {max:?}]")]
    EmptyAfterBounds { min: Option<f64>, max: Option<f64> },

    #[error("{param} has not been populated yet")]
    NotPopulated { param: &'static str },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("line {line}, column {column}: '{text}' is not a number")]
    Parse {
        line: usize,
        column: usize,
        text: String,
    },
}

/// Errors raised by the tick engine
#[derive(Debug, Error, PartialEq)]
pub enum TickError {
    #[error("logarithmic axis requires positive values (values[{index}] = {value})")]
    Domain { index: usize, value: f64 },

    #[error("tick computation needs at least one value")]
    DegenerateRange,

    #[error("observed range [{min}, {max}] is not a finite, ordered pair")]
    InvalidBounds { min: f64, max: f64 },
}

/// Errors raised while configuring a single series
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("{mode:?} interpolation needs at least {required} points, got {actual}")]
    InsufficientPoints {
        mode: Interpolation,
        required: usize,
        actual: usize,
    },

    #[error("series '{label}' has no marker and no line to draw")]
    Unplottable { label: String },

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Why a panel refused a series
#[derive(Debug, Error)]
pub enum SeriesRejection {
    #[error("data source reports itself incomplete")]
    Incomplete,

    #[error("logarithmic {axis:?} axis cannot show value {value}")]
    NonPositive { axis: AxisId, value: f64 },
}

/// Why a figure refused a panel
#[derive(Debug, Error)]
pub enum PanelRejection {
    #[error("panel has no series")]
    NoSeries,

    #[error("logarithmic independent axis cannot show value {value} (series {series})")]
    NonPositive { series: usize, value: f64 },
}

/// Errors raised by panels and figures
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("series {index} rejected: {reason}")]
    InvalidSeries {
        index: usize,
        #[source]
        reason: SeriesRejection,
    },

    #[error("panel {index} rejected: {reason}")]
    InvalidPanel {
        index: usize,
        #[source]
        reason: PanelRejection,
    },

    #[error("{param} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        param: &'static str,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Tick(#[from] TickError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Data(#[from] DataError),
}

pub type ChartResult<T> = Result<T, ChartError>;

/// Errors raised by rendering backends
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save chart: {0}")]
    Backend(String),

    #[error("unsupported output format '{0}' (use .png or .svg)")]
    UnsupportedFormat(String),
}

/// Errors raised while loading a chart description
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid chart description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown color '{0}'")]
    Color(String),

    #[error("panel {panel}, series {series}: give either inline data or a table, not both")]
    AmbiguousData { panel: usize, series: usize },

    #[error("panel {panel}, series {series}: {source}")]
    Series {
        panel: usize,
        series: usize,
        #[source]
        source: SeriesError,
    },

    #[error(transparent)]
    Chart(#[from] ChartError),
}

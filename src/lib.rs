//! Automatic axis scaling and tick generation for multi-panel charts.
//!
//! Data flows `DataSource -> Series -> Panel -> Figure`: panels compute
//! dependent-axis ticks from their series, the figure computes one shared
//! independent axis, and the resulting scale divisors are pushed back down so
//! every series holds coordinates ready for a [`Renderer`].

pub mod chart;
pub mod config;
pub mod error;
pub mod figure;
pub mod layout;
pub mod panel;
pub mod render;
pub mod series;
pub mod source;
pub mod style;
pub mod ticks;

pub use config::FigureConfig;
pub use error::{
    ChartError, ChartResult, ConfigError, DataError, PanelRejection, RenderError, SeriesError,
    SeriesRejection, TickError,
};
pub use figure::Figure;
pub use panel::Panel;
pub use render::{AxisId, RecordingRenderer, RenderCommand, Renderer};
pub use series::{Interpolation, Series, SeriesBuilder, scale_values};
pub use source::{Column, DataSource, TableSource, VectorSource};
pub use style::{Color, LegendPosition, LineStyle, Marker};
pub use ticks::{TickResult, compute, compute_auto};

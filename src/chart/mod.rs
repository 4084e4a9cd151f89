//! Chart rendering through charming (ECharts server-side rendering)

mod colors;
mod echarts;

pub use echarts::EchartsRenderer;

use std::path::Path;

use crate::error::RenderError;

/// Image format written by [`EchartsRenderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Pick the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(RenderError::UnsupportedFormat(extension)),
        }
    }
}

//! CLI mode implementations

mod render;
mod ticks;

pub use render::{RenderOptions, run_render};
pub use ticks::run_ticks;

use std::path::Path;

use tickplot::{Figure, FigureConfig};

use crate::output::get_display_name;

/// Figure built from a description file, plus its requested image size
pub struct LoadedChart {
    pub name: String,
    pub figure: Figure,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Load a chart description and build its figure
pub fn load_chart(path: &Path, show_progress: bool) -> Result<LoadedChart, String> {
    let display_name = get_display_name(path);
    if show_progress {
        eprint!("Loading {}...", display_name);
    }

    let loaded = FigureConfig::load(path).and_then(|config| {
        let figure = config.build()?;
        Ok((figure, config.width, config.height))
    });
    let (figure, width, height) = loaded.map_err(|e| {
        if show_progress {
            eprintln!();
        }
        format!("{}: {}", display_name, e)
    })?;

    if show_progress {
        eprintln!(" done");
    }
    Ok(LoadedChart {
        name: display_name,
        figure,
        width,
        height,
    })
}

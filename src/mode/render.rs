//! Chart description rendering mode

use std::path::PathBuf;

use tickplot::chart::EchartsRenderer;
use tickplot::layout::{self, FONT_SIZE};
use tickplot::render::FigureSize;
use tickplot::RecordingRenderer;

use crate::output::{print_error, print_figure_summary, print_warning};

use super::load_chart;

pub struct RenderOptions {
    pub config: PathBuf,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub json: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Build the described figure, summarize its axes and save the chart
pub fn run_render(options: &RenderOptions, quiet: bool) {
    let chart = load_chart(&options.config, !quiet).unwrap_or_else(|e| {
        print_error(&e);
        std::process::exit(1);
    });
    let figure = &chart.figure;

    if !quiet {
        println!();
        println!("Chart: {}", chart.name);
        print_figure_summary(figure);
    }

    // Command-line size beats the description, which beats the measured size
    let mut recorder = RecordingRenderer::new();
    let measured = layout::figure_size(figure, &recorder, FONT_SIZE);
    let size = FigureSize {
        width: options.width.or(chart.width).unwrap_or(measured.width),
        height: options.height.or(chart.height).unwrap_or(measured.height),
    };
    if size.width < measured.width || size.height < measured.height {
        print_warning(&format!(
            "requested size {}x{} is smaller than the measured {}x{}; labels may be clipped",
            size.width, size.height, measured.width, measured.height
        ));
    }

    if options.dry_run {
        if let Err(e) = figure.draw_sized(&mut recorder, size) {
            print_error(&e.to_string());
            std::process::exit(1);
        }
        if options.json {
            match serde_json::to_string_pretty(recorder.commands()) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    print_error(&format!("Failed to serialize draw commands: {}", e));
                    std::process::exit(1);
                }
            }
        } else if !quiet {
            println!();
            println!(
                "Dry run: {} draw commands, {}x{}",
                recorder.commands().len(),
                size.width,
                size.height
            );
        }
        return;
    }

    let Some(path) = options.output.as_ref() else {
        print_error("--output is required unless --dry-run is given");
        std::process::exit(1);
    };
    let mut renderer = EchartsRenderer::new(path).unwrap_or_else(|e| {
        print_error(&e.to_string());
        std::process::exit(1);
    });
    let result = figure.draw_sized(&mut renderer, size);
    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
    eprintln!("Chart saved to: {}", path.display());
}

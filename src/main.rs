mod mode;
mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mode::{RenderOptions, run_render, run_ticks};
use output::print_error;

#[derive(Parser)]
#[command(
    name = "tickplot",
    version,
    about = "Multi-panel charts with automatic engineering-scaled axes",
    after_help = "Examples:
  tickplot render chart.json -o chart.png              Render a chart description
  tickplot render chart.json -o chart.svg --width 1200 Fixed width, SVG output
  tickplot render chart.json --dry-run --json          Print draw commands as JSON
  tickplot ticks 0.9 2.5 10.5                          Inspect the tick engine
  tickplot ticks --tight 100 200 300 400 500 600 700   Ticks clamped to the data
  tickplot ticks --log 3 40 700                        Decade ticks"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Suppress summaries (show data only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Render a JSON chart description to PNG or SVG
    Render {
        /// Chart description file
        config: PathBuf,

        /// Output image (.png or .svg)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Build and lay out the chart without writing an image
        #[arg(long)]
        dry_run: bool,

        /// Print the draw commands as JSON (with --dry-run)
        #[arg(long)]
        json: bool,

        /// Image width in pixels (default: measured from the labels)
        #[arg(long, value_name = "PIXELS")]
        width: Option<u32>,

        /// Image height in pixels (default: measured from the labels)
        #[arg(long, value_name = "PIXELS")]
        height: Option<u32>,
    },

    /// Compute axis ticks for a set of values
    Ticks {
        /// Data values
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Clamp the outer ticks to the data range
        #[arg(long)]
        tight: bool,

        /// Logarithmic axis (values must be positive)
        #[arg(long)]
        log: bool,
    },
}

fn init_logging(verbose: u8, color: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "warn,tickplot=debug",
        _ => "warn,tickplot=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();

    // Handle --no-color
    if args.no_color {
        colored::control::set_override(false);
    }
    init_logging(args.verbose, !args.no_color);

    match args.command {
        Command::Render {
            config,
            output,
            dry_run,
            json,
            width,
            height,
        } => {
            if json && !dry_run {
                print_error("--json can only be used with --dry-run");
                std::process::exit(1);
            }
            if !dry_run && output.is_none() {
                print_error("--output is required unless --dry-run is given");
                std::process::exit(1);
            }
            if width == Some(0) || height == Some(0) {
                print_error("Image size must be positive");
                std::process::exit(1);
            }
            if !config.exists() {
                print_error(&format!("File does not exist: {}", config.display()));
                std::process::exit(1);
            }

            // Validate image output path
            if let Some(ref path) = output {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                    && !parent.exists()
                {
                    print_error(&format!("Directory does not exist: {}", parent.display()));
                    std::process::exit(1);
                }
                if let Err(e) = tickplot::chart::OutputFormat::from_path(path) {
                    print_error(&e.to_string());
                    std::process::exit(1);
                }
            }

            let options = RenderOptions {
                config,
                output,
                dry_run,
                json,
                width,
                height,
            };
            run_render(&options, args.quiet);
        }
        Command::Ticks { values, tight, log } => {
            if let Some(v) = values.iter().find(|v| !v.is_finite()) {
                print_error(&format!("Values must be finite (got {})", v));
                std::process::exit(1);
            }
            run_ticks(&values, tight, log, args.quiet);
        }
    }
}

use colored::*;

use tickplot::{AxisId, Figure, Panel, TickResult};

fn style_label(label: &str) -> ColoredString {
    label.bold()
}

pub(crate) fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub(crate) fn print_warning(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

pub(crate) fn get_display_name(path: &std::path::Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or_else(|| path.display().to_string(), str::to_string)
}

/// Shortest decimal rendering of a tick location
fn format_value(value: f64) -> String {
    let text = format!("{}", value);
    if text == "-0" { "0".to_string() } else { text }
}

pub(crate) fn print_scale(ticks: &TickResult) {
    if ticks.log {
        println!("Scale: logarithmic (decades)");
    } else if ticks.unit_prefix.is_empty() {
        println!("Scale: 1");
    } else {
        println!("Scale: {} ({})", format_value(ticks.scale), ticks.unit_prefix);
    }
    println!(
        "Limits: {} .. {}",
        format_value(ticks.axis_min),
        format_value(ticks.axis_max)
    );
    println!();
}

pub(crate) fn print_tick_table(ticks: &TickResult) {
    let width = ticks
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);
    let header = format!("{:>width$}  {}", "LABEL", "LOCATION", width = width);
    println!("{}", style_label(&header));
    println!("{}", "-".repeat(width + 2 + 12));
    for (label, location) in ticks.labels.iter().zip(&ticks.locations) {
        let shown = if label.is_empty() { "-" } else { label.as_str() };
        println!("{:>width$}  {}", shown, format_value(*location), width = width);
    }
}

/// Labels only, space separated (quiet mode)
pub(crate) fn print_labels(ticks: &TickResult) {
    let labels: Vec<&str> = ticks
        .labels
        .iter()
        .map(|l| if l.is_empty() { "-" } else { l.as_str() })
        .collect();
    println!("{}", labels.join(" "));
}

fn print_axis_row(name: &str, title: &str, ticks: &TickResult) {
    let kind = if ticks.log { "log" } else { "lin" };
    print!("  {} {}", style_label(&format!("{:<12}", name)), kind);
    if !title.is_empty() {
        print!("  \"{}\"", title);
    }
    println!();
    println!("    ticks: {}", ticks.labels.join(" ").trim());
}

pub(crate) fn print_panel_summary(index: usize, panel: &Panel) {
    println!("[Panel {}] {} series", index + 1, panel.len());
    for (axis, name, ticks) in [
        (AxisId::Primary, "Primary", panel.primary_ticks()),
        (AxisId::Secondary, "Secondary", panel.secondary_ticks()),
    ] {
        if let Some(ticks) = ticks {
            print_axis_row(name, &panel.axis_title(axis), ticks);
        }
    }
    for series in panel.series() {
        let side = if series.is_secondary() { "secondary" } else { "primary" };
        println!(
            "    - {} ({:?}, {} points, {})",
            if series.label().is_empty() { "<unlabeled>" } else { series.label() },
            series.interpolation(),
            series.independent_values().len(),
            side
        );
    }
}

pub(crate) fn print_figure_summary(figure: &Figure) {
    println!("Figure: {} panel(s)", figure.len());
    if let Some(ticks) = figure.independent_ticks() {
        print_axis_row("Independent", &figure.independent_title(), ticks);
    }
    println!();
    for (index, panel) in figure.panels().iter().enumerate() {
        print_panel_summary(index, panel);
    }
}

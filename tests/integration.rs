//! Integration tests for the tickplot CLI

mod common;

use std::process::Command;
use tempfile::TempDir;

/// Get the path to the tickplot binary
fn tickplot_bin() -> std::path::PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("tickplot");
    path
}

/// Run tickplot with the given arguments
fn run_tickplot(args: &[&str]) -> std::process::Output {
    Command::new(tickplot_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute tickplot")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Two panels over a shared time axis, the second with a secondary axis
fn create_two_panel_chart(dir: &TempDir) -> std::path::PathBuf {
    let (t, v) = common::sine_points(50.0, 2.5, 1000.0, 40);
    let current: Vec<f64> = common::noise(40, 0.004, 7).iter().map(|n| n + 0.02).collect();
    let temperature: Vec<f64> = (0..40).map(|i| 20.0 + i as f64 * 0.5).collect();

    common::write_chart(
        dir.path(),
        "chart.json",
        r#""independent_label": "Time", "independent_units": "s""#,
        &[
            vec![common::inline_series("voltage", &t, &v, r#""marker": "circle""#)],
            vec![
                common::inline_series("current", &t, &current, r#""interpolation": "step""#),
                common::inline_series(
                    "temperature",
                    &t,
                    &temperature,
                    r#""secondary_axis": true, "line_style": "dashed""#,
                ),
            ],
        ],
    )
}

// =============================================================================
// Basic functionality tests
// =============================================================================

#[test]
fn test_help_flag() {
    let output = run_tickplot(&["--help"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("automatic engineering-scaled axes"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("ticks"));
    assert!(stdout.contains("--no-color"));
}

#[test]
fn test_version_flag() {
    let output = run_tickplot(&["--version"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("tickplot"));
}

#[test]
fn test_missing_subcommand() {
    let output = run_tickplot(&[]);
    assert!(!output.status.success());
}

// =============================================================================
// Ticks mode
// =============================================================================

#[test]
fn test_ticks_quiet_prints_labels() {
    let output = run_tickplot(&["ticks", "-q", "0.9", "10.5"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "0 2 4 6 8 10 12");
}

#[test]
fn test_ticks_tight_exact_grid() {
    let output = run_tickplot(&[
        "ticks", "-q", "--tight", "100", "200", "300", "400", "500", "600", "700",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "100 200 300 400 500 600 700");
}

#[test]
fn test_ticks_log_decades() {
    let output = run_tickplot(&["ticks", "-q", "--log", "3", "40", "700"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "1 10 100 1000");
}

#[test]
fn test_ticks_table_shows_prefix() {
    let output = run_tickplot(&["--no-color", "ticks", "1200", "9800"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("[Ticks] 2 values, loose"));
    assert!(stdout.contains("Scale: 1000 (k)"));
    assert!(stdout.contains("LABEL"));
}

#[test]
fn test_ticks_accept_negative_values() {
    let output = run_tickplot(&["ticks", "-q", "-5", "5"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains('0'));
}

#[test]
fn test_ticks_log_rejects_non_positive() {
    let output = run_tickplot(&["--no-color", "ticks", "--log", "1", "-5"]);
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("positive"));
}

#[test]
fn test_ticks_rejects_non_numbers() {
    let output = run_tickplot(&["ticks", "one", "two"]);
    assert!(!output.status.success());
}

// =============================================================================
// Render mode
// =============================================================================

#[test]
fn test_render_dry_run_summary() {
    let temp_dir = TempDir::new().unwrap();
    let chart = create_two_panel_chart(&temp_dir);

    let output = run_tickplot(&["--no-color", "render", chart.to_str().unwrap(), "--dry-run"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Figure: 2 panel(s)"));
    assert!(stdout.contains("Time (ms)"));
    assert!(stdout.contains("[Panel 1] 1 series"));
    assert!(stdout.contains("[Panel 2] 2 series"));
    assert!(stdout.contains("Secondary"));
    assert!(stdout.contains("Dry run:"));
}

#[test]
fn test_render_dry_run_json_commands() {
    let temp_dir = TempDir::new().unwrap();
    let chart = create_two_panel_chart(&temp_dir);

    let output = run_tickplot(&["-q", "render", chart.to_str().unwrap(), "--dry-run", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let commands: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let commands = commands.as_array().unwrap();
    assert_eq!(commands[0]["command"], "begin_figure");
    assert_eq!(commands[0]["panels"], 2);
    assert_eq!(commands.last().unwrap()["command"], "finish");

    let lines = commands.iter().filter(|c| c["command"] == "line").count();
    let markers = commands.iter().filter(|c| c["command"] == "markers").count();
    assert_eq!(lines, 3);
    assert_eq!(markers, 1);
}

#[test]
fn test_render_svg() {
    let temp_dir = TempDir::new().unwrap();
    let chart = create_two_panel_chart(&temp_dir);
    let image_path = temp_dir.path().join("chart.svg");

    let output = run_tickplot(&[
        "-q",
        "render",
        chart.to_str().unwrap(),
        "-o",
        image_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stderr_of(&output).contains("Chart saved to:"));

    let svg = std::fs::read_to_string(&image_path).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn test_render_png_from_table() {
    let temp_dir = TempDir::new().unwrap();
    let (t, v) = common::sine_points(5.0, 1000.0, 100.0, 30);
    common::write_csv(&temp_dir.path().join("signal.csv"), ("time", "level"), &t, &v).unwrap();
    let series = r#"{"label": "level", "table": {"path": "signal.csv", "independent": "time", "dependent": "level"}, "interpolation": "cubic"}"#;
    let chart = common::write_chart(temp_dir.path(), "table.json", "", &[vec![series.to_string()]]);
    let image_path = temp_dir.path().join("table.png");

    let output = run_tickplot(&[
        "-q",
        "render",
        chart.to_str().unwrap(),
        "-o",
        image_path.to_str().unwrap(),
        "--width",
        "1000",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(image_path.exists(), "Image file should be created");
    assert!(std::fs::metadata(&image_path).unwrap().len() > 0);
}

// =============================================================================
// Validation errors
// =============================================================================

#[test]
fn test_render_requires_output_without_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    let chart = create_two_panel_chart(&temp_dir);

    let output = run_tickplot(&["render", chart.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("--output is required"));
}

#[test]
fn test_render_output_directory_must_exist() {
    let temp_dir = TempDir::new().unwrap();
    let chart = create_two_panel_chart(&temp_dir);
    let missing = temp_dir.path().join("missing").join("chart.png");

    let output = run_tickplot(&["render", chart.to_str().unwrap(), "-o", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Directory does not exist"));
}

#[test]
fn test_render_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let chart = create_two_panel_chart(&temp_dir);
    let image = temp_dir.path().join("chart.gif");

    let output = run_tickplot(&["render", chart.to_str().unwrap(), "-o", image.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("unsupported output format"));
}

#[test]
fn test_render_json_requires_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    let chart = create_two_panel_chart(&temp_dir);
    let image = temp_dir.path().join("chart.svg");

    let output = run_tickplot(&[
        "render",
        chart.to_str().unwrap(),
        "-o",
        image.to_str().unwrap(),
        "--json",
    ]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("--json can only be used with --dry-run"));
}

#[test]
fn test_render_missing_description() {
    let output = run_tickplot(&["render", "/nonexistent/chart.json", "--dry-run"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("File does not exist"));
}

#[test]
fn test_render_reports_invalid_series() {
    let temp_dir = TempDir::new().unwrap();
    let chart = common::write_chart(
        temp_dir.path(),
        "cubic.json",
        "",
        &[vec![common::inline_series(
            "short",
            &[1.0, 2.0, 3.0],
            &[1.0, 4.0, 9.0],
            r#""interpolation": "cubic""#,
        )]],
    );

    let output = run_tickplot(&["--no-color", "render", chart.to_str().unwrap(), "--dry-run"]);
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("panel 0, series 0"));
    assert!(stderr.contains("at least 4 points"));
}

#[test]
fn test_render_rejects_malformed_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{\"panels\": [").unwrap();

    let output = run_tickplot(&["render", path.to_str().unwrap(), "--dry-run"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("invalid chart description"));
}

//! Common test utilities

#![allow(dead_code)]

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

/// Sampled sine wave as (time, value) columns
pub fn sine_points(freq: f64, amplitude: f64, sample_rate: f64, count: usize) -> (Vec<f64>, Vec<f64>) {
    let times: Vec<f64> = (0..count).map(|i| i as f64 / sample_rate).collect();
    let values = times
        .iter()
        .map(|t| (2.0 * PI * freq * t).sin() * amplitude)
        .collect();
    (times, values)
}

/// Uniform noise in `[-amplitude, amplitude)`
pub fn noise(count: usize, amplitude: f64, seed: u64) -> Vec<f64> {
    let mut rng = SimpleRng::new(seed);
    (0..count)
        .map(|_| (rng.next_f64() * 2.0 - 1.0) * amplitude)
        .collect()
}

/// Simple pseudo-random number generator (xorshift)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        self.next_u64() as f64 / u64::MAX as f64
    }
}

/// Write two columns as a CSV file with a header row
pub fn write_csv(path: &Path, header: (&str, &str), x: &[f64], y: &[f64]) -> std::io::Result<()> {
    let mut text = format!("{},{}\n", header.0, header.1);
    for (a, b) in x.iter().zip(y) {
        text.push_str(&format!("{},{}\n", a, b));
    }
    std::fs::write(path, text)
}

/// JSON for an inline series
pub fn inline_series(label: &str, x: &[f64], y: &[f64], extra: &str) -> String {
    let join = |v: &[f64]| {
        v.iter()
            .map(|n| format!("{:?}", n))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let extra = if extra.is_empty() {
        String::new()
    } else {
        format!(", {}", extra)
    };
    format!(
        r#"{{"label": "{}", "independent": [{}], "dependent": [{}]{}}}"#,
        label,
        join(x),
        join(y),
        extra
    )
}

/// Write a chart description with one panel per entry of `panels`
/// (each entry is the panel's list of series JSON objects)
pub fn write_chart(dir: &Path, name: &str, header: &str, panels: &[Vec<String>]) -> PathBuf {
    let panels: Vec<String> = panels
        .iter()
        .map(|series| format!(r#"{{"series": [{}]}}"#, series.join(", ")))
        .collect();
    let header = if header.is_empty() {
        String::new()
    } else {
        format!("{}, ", header)
    };
    let text = format!(r#"{{{}"panels": [{}]}}"#, header, panels.join(", "));
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

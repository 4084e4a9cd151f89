//! Shortest-precision, collision-free tick labels

use std::collections::HashSet;

/// Precision the search starts from
pub(crate) const MAX_PRECISION: usize = 10;

/// Most fractional digits tried before falling back to exponent notation
const MAX_EXTENDED_PRECISION: usize = 20;

/// Largest rounding error a label may carry, as a fraction of the smallest tick gap
const ROUNDING_TOLERANCE: f64 = 0.05;

/// Render a value with a fixed number of fractional digits, never as "-0"
pub(crate) fn format_label(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    match text.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => text,
    }
}

/// Labels for already-scaled tick values.
///
/// Starting at [`MAX_PRECISION`], the precision drops one digit at a time
/// while the labels stay pairwise distinct, stay within a small fraction of
/// the tick gap of their value, and, when an extreme tick had a fractional
/// part to begin with, at least one extreme keeps a non-zero fractional
/// digit. The last precision that passed is used for every label.
///
/// Values too close together for [`MAX_PRECISION`] digits get more digits,
/// up to [`MAX_EXTENDED_PRECISION`], and exponent notation beyond that.
pub(crate) fn unique_labels(values: &[f64]) -> Vec<String> {
    match choose_precision(values) {
        Some(precision) => render(values, precision),
        None => render_exponent(values),
    }
}

pub(crate) fn choose_precision(values: &[f64]) -> Option<usize> {
    let tolerance = smallest_gap(values) * ROUNDING_TOLERANCE;
    let acceptable =
        |labels: &[String]| all_distinct(labels) && rounding_error(values, labels) <= tolerance;

    let start = render(values, MAX_PRECISION);
    if !acceptable(&start) {
        return (MAX_PRECISION + 1..=MAX_EXTENDED_PRECISION)
            .find(|&precision| acceptable(&render(values, precision)));
    }

    let keep_fraction = extremes_have_fraction(&start);
    let mut chosen = MAX_PRECISION;
    for precision in (0..MAX_PRECISION).rev() {
        let labels = render(values, precision);
        if !acceptable(&labels) {
            break;
        }
        if keep_fraction && !extremes_have_fraction(&labels) {
            break;
        }
        chosen = precision;
    }
    Some(chosen)
}

/// Shortest mantissa precision in exponent notation that keeps labels
/// distinct and close to their values
fn render_exponent(values: &[f64]) -> Vec<String> {
    let tolerance = smallest_gap(values) * ROUNDING_TOLERANCE;
    (0..=16)
        .map(|precision| {
            values
                .iter()
                .map(|v| format!("{:.*e}", precision, v))
                .collect::<Vec<_>>()
        })
        .find(|labels| all_distinct(labels) && rounding_error(values, labels) <= tolerance)
        .unwrap_or_else(|| values.iter().map(|v| format!("{:e}", v)).collect())
}

fn smallest_gap(values: &[f64]) -> f64 {
    let gap = values
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .filter(|g| *g > 0.0)
        .fold(f64::INFINITY, f64::min);
    if gap.is_finite() {
        gap
    } else {
        values.first().map_or(1.0, |v| v.abs().max(1.0))
    }
}

fn rounding_error(values: &[f64], labels: &[String]) -> f64 {
    values
        .iter()
        .zip(labels)
        .map(|(v, l)| l.parse::<f64>().map_or(f64::INFINITY, |parsed| (parsed - v).abs()))
        .fold(0.0, f64::max)
}

/// Total rendered length, the cost used for scale selection
pub(crate) fn char_count(labels: &[String]) -> usize {
    labels.iter().map(|l| l.chars().count()).sum()
}

pub(crate) fn all_distinct(labels: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(labels.len());
    labels.iter().all(|l| seen.insert(l.as_str()))
}

fn render(values: &[f64], precision: usize) -> Vec<String> {
    values.iter().map(|&v| format_label(v, precision)).collect()
}

fn extremes_have_fraction(labels: &[String]) -> bool {
    [labels.first(), labels.last()]
        .into_iter()
        .flatten()
        .any(|label| has_fraction(label))
}

fn has_fraction(label: &str) -> bool {
    label
        .split_once('.')
        .is_some_and(|(_, fraction)| fraction.chars().any(|c| c != '0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_drop_all_decimals() {
        assert_eq!(unique_labels(&[0.0, 2.0, 4.0]), vec!["0", "2", "4"]);
    }

    #[test]
    fn test_halves_keep_one_decimal() {
        assert_eq!(
            unique_labels(&[0.0, 0.5, 1.0, 1.5]),
            vec!["0.0", "0.5", "1.0", "1.5"]
        );
    }

    #[test]
    fn test_float_noise_is_hidden() {
        let labels = unique_labels(&[0.1, 0.2, 0.30000000000000004, 0.4]);
        assert_eq!(labels, vec!["0.1", "0.2", "0.3", "0.4"]);
    }

    #[test]
    fn test_fractional_extreme_is_kept() {
        // All distinct at precision 0, but the extremes would lose their fraction
        let labels = unique_labels(&[0.9, 2.0, 4.0, 10.5]);
        assert_eq!(labels, vec!["0.9", "2.0", "4.0", "10.5"]);
    }

    #[test]
    fn test_rounding_never_moves_a_label_onto_another_value() {
        // Half-even rounding would give distinct but wrong "2", "4", "8" at precision 0
        let values = [0.0, 1.5, 3.0, 4.5, 6.0, 7.5, 9.0];
        assert_eq!(
            unique_labels(&values),
            vec!["0.0", "1.5", "3.0", "4.5", "6.0", "7.5", "9.0"]
        );
    }

    #[test]
    fn test_close_values_get_more_digits() {
        let labels = unique_labels(&[1e-12, 2e-12, 3e-12]);
        assert_eq!(labels, vec!["0.000000000001", "0.000000000002", "0.000000000003"]);
    }

    #[test]
    fn test_exponent_fallback_for_vanishing_values() {
        let labels = unique_labels(&[1e-300, 2e-300, 3.5e-300]);
        assert_eq!(labels, vec!["1.0e-300", "2.0e-300", "3.5e-300"]);
    }

    #[test]
    fn test_negative_zero_is_not_rendered() {
        assert_eq!(format_label(-0.0, 1), "0.0");
        assert_eq!(format_label(-0.00001, 2), "0.00");
        assert_eq!(format_label(-1.25, 2), "-1.25");
    }

    #[test]
    fn test_char_count() {
        let labels = vec!["10".to_string(), "µ".to_string()];
        assert_eq!(char_count(&labels), 3);
    }
}

//! Unit tests for the tick engine

use super::labels::{all_distinct, char_count, unique_labels};
use super::*;

/// Deterministic pseudo-random vectors (xorshift), spread over many magnitudes
fn sample_vectors() -> Vec<Vec<f64>> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state as f64 / u64::MAX as f64) * 2.0 - 1.0
    };

    let mut vectors = Vec::new();
    for exponent in (-40..=40).step_by(3) {
        let magnitude = 10f64.powi(exponent);
        for len in [2usize, 5, 17] {
            let offset = next() * magnitude * 10.0;
            vectors.push((0..len).map(|_| offset + next() * magnitude).collect());
        }
    }
    vectors
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[test]
fn test_labels_pairwise_distinct() {
    for values in sample_vectors() {
        for tight in [false, true] {
            let result = compute_auto(&values, tight, false).unwrap();
            assert_eq!(result.labels.len(), result.locations.len());
            assert!(
                all_distinct(&result.labels),
                "duplicate labels {:?} for {:?}",
                result.labels,
                values
            );
        }
    }
}

#[test]
fn test_axis_limits_bound_the_data() {
    for values in sample_vectors() {
        let (min, max) = min_max(&values);
        for tight in [false, true] {
            let result = compute_auto(&values, tight, false).unwrap();
            let tolerance = (max - min).abs() * 1e-9 / result.scale;
            assert!(result.axis_min <= min / result.scale + tolerance);
            assert!(result.axis_max >= max / result.scale - tolerance);
        }
    }
}

#[test]
fn test_chosen_scale_is_never_longer_than_min_or_max_reference() {
    for values in sample_vectors() {
        let result = compute_auto(&values, false, false).unwrap();
        let raw: Vec<f64> = result.locations.iter().map(|l| l * result.scale).collect();
        let chosen = char_count(&result.labels);

        for reference in [raw[0], raw[raw.len() - 1]] {
            let alternative = EngScale::for_value(reference);
            let scaled: Vec<f64> = raw.iter().map(|t| t / alternative.factor).collect();
            let cost = char_count(&unique_labels(&scaled));
            assert!(
                chosen <= cost,
                "chosen {} chars {:?}, {} reference costs {}",
                chosen,
                result.labels,
                alternative.prefix,
                cost
            );
        }
    }
}

#[test]
fn test_single_value_gives_three_centered_ticks() {
    for value in [0.0, 1.0, -3.5, 42.0, 5000.0, 2.5e-6] {
        let result = compute_auto(&[value, value, value], true, false).unwrap();
        assert_eq!(result.len(), 3, "ticks for {}", value);
        let middle = result.locations[1] * result.scale;
        assert!(
            (middle - value).abs() <= value.abs() * 1e-12,
            "middle {} for {}",
            middle,
            value
        );
        assert!(all_distinct(&result.labels));
    }
}

#[test]
fn test_single_value_ignores_tight() {
    let tight = compute_auto(&[7.0], true, false).unwrap();
    let loose = compute_auto(&[7.0], false, false).unwrap();
    assert_eq!(tight, loose);
    assert!(tight.axis_min < 7.0 && tight.axis_max > 7.0);
}

#[test]
fn test_tight_regular_grid_uses_exact_fit() {
    let values = [100.0, 200.0, 300.0, 400.0, 300.0, 400.0, 500.0, 600.0, 700.0];
    let result = compute(&values, 100.0, 700.0, true, false).unwrap();
    assert_eq!(
        result.locations,
        vec![100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0]
    );
    assert_eq!(result.axis_min, 100.0);
    assert_eq!(result.axis_max, 700.0);
    assert_eq!(result.unit_prefix, "");
}

#[test]
fn test_tight_irregular_data_falls_back_to_general() {
    let values = [0.9, 2.5, 3.0, 3.5, 5.9, 6.6, 7.1, 7.9, 9.9, 10.47];
    let result = compute_auto(&values, true, false).unwrap();
    assert_eq!(result.locations.first(), Some(&0.9));
    assert_eq!(result.locations.last(), Some(&10.47));
    assert!(result.locations.iter().all(|&l| (0.9..=10.47).contains(&l)));
}

#[test]
fn test_loose_ticks_extend_past_data() {
    let result = compute_auto(&[0.9, 10.5], false, false).unwrap();
    assert_eq!(result.locations, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
    assert_eq!(result.labels, vec!["0", "2", "4", "6", "8", "10", "12"]);
    assert_eq!(result.axis_min, 0.0);
    assert_eq!(result.axis_max, 12.0);
}

#[test]
fn test_engineering_prefix_for_large_values() {
    let result = compute_auto(&[1200.0, 9800.0], false, false).unwrap();
    assert_eq!(result.unit_prefix, "k");
    assert_eq!(result.scale, 1000.0);
    assert!(result.locations.iter().all(|&l| l < 100.0));
}

#[test]
fn test_engineering_prefix_for_small_values() {
    let result = compute_auto(&[0.0012, 0.0047], false, false).unwrap();
    assert_eq!(result.unit_prefix, "m");
    assert!(all_distinct(&result.labels));
}

#[test]
fn test_log_ticks_on_decades() {
    let result = compute_auto(&[3.0, 40.0, 700.0], true, true).unwrap();
    assert!(result.log);
    assert_eq!(result.locations, vec![1.0, 10.0, 100.0, 1000.0]);
    assert_eq!(result.labels, vec!["1", "10", "100", "1000"]);
    assert_eq!(result.scale, 1.0);
}

#[test]
fn test_log_padding_when_data_touches_a_decade() {
    let result = compute_auto(&[100.0, 200.0, 300.0, 400.0], false, true).unwrap();
    assert_eq!(result.locations, vec![10.0, 100.0, 1000.0]);
    assert_eq!(result.labels, vec!["", "100", "1000"]);
    assert_eq!(result.labeled(), 2);
}

#[test]
fn test_log_single_value() {
    let result = compute_auto(&[100.0], true, true).unwrap();
    assert_eq!(result.locations, vec![10.0, 100.0, 1000.0]);
    assert_eq!(result.labels[1], "100");
}

#[test]
fn test_log_rejects_non_positive() {
    let err = compute_auto(&[1.0, -5.0, 3.0], false, true).unwrap_err();
    assert_eq!(
        err,
        TickError::Domain {
            index: 1,
            value: -5.0
        }
    );
}

#[test]
fn test_empty_values_are_degenerate() {
    assert_eq!(
        compute(&[], 0.0, 1.0, false, false).unwrap_err(),
        TickError::DegenerateRange
    );
    assert_eq!(
        compute_auto(&[], false, false).unwrap_err(),
        TickError::DegenerateRange
    );
}

#[test]
fn test_labels_distinct_below_the_prefix_table() {
    let result = compute_auto(&[1e-30, 2e-30, 3e-30], false, false).unwrap();
    assert_eq!(result.unit_prefix, "y");
    assert!(all_distinct(&result.labels), "labels {:?}", result.labels);

    let result = compute_auto(&[1e-300, 2e-300, 3e-300], true, false).unwrap();
    assert!(all_distinct(&result.labels), "labels {:?}", result.labels);
}

#[test]
fn test_single_value_near_float_limit_is_rejected() {
    let err = compute_auto(&[f64::MAX * 0.95], false, false).unwrap_err();
    assert!(matches!(err, TickError::InvalidBounds { .. }));
}

#[test]
fn test_overflowing_range_is_rejected() {
    let err = compute_auto(&[-f64::MAX, f64::MAX], false, false).unwrap_err();
    assert!(matches!(err, TickError::InvalidBounds { .. }));
}

#[test]
fn test_resampled_locations_carry_no_float_noise() {
    let result = TickResult {
        locations: vec![0.0, 1.0],
        labels: vec!["0".to_string(), "1".to_string()],
        axis_min: 0.0,
        axis_max: 1.0,
        scale: 1.0,
        unit_prefix: String::new(),
        log: false,
    };
    let resampled = result.resampled(10);
    assert_eq!(resampled.locations[3], 0.3);
    assert_eq!(resampled.locations[7], 0.7);
}

#[test]
fn test_inverted_bounds_rejected() {
    let err = compute(&[1.0], 2.0, 1.0, false, false).unwrap_err();
    assert!(matches!(err, TickError::InvalidBounds { .. }));
}

#[test]
fn test_resampled_keeps_ends_and_scale() {
    let result = compute_auto(&[0.9, 10.5], false, false).unwrap();
    let resampled = result.resampled(8);
    assert_eq!(resampled.len(), 9);
    assert_eq!(resampled.locations[0], 0.0);
    assert_eq!(resampled.locations[8], 12.0);
    assert_eq!(resampled.scale, result.scale);
    assert_eq!(resampled.labels[1], "1.5");
    assert!(all_distinct(&resampled.labels));
}

//! Tick spacing search: exact fit over a known grid and the general case

use tracing::trace;

use super::{MAX_TICKS, MIN_TICKS};

/// Relative tolerance for the floating-point GCD
const GCD_TOLERANCE: f64 = 1e-10;

/// Upper bound on doublings tried by the exact-fit search
const MAX_DOUBLINGS: u32 = 16;

/// Nice step multipliers applied to the range's power of ten, smallest first
const STEP_MULTIPLIERS: [f64; 9] = [0.1, 0.2, 0.25, 0.5, 1.0, 2.0, 2.5, 5.0, 10.0];

/// Slack used when snapping the data range onto a grid
const GRID_EPSILON: f64 = 1e-9;

/// Decimal digits kept below the leading digit of the spacing
const SNAP_DIGITS: i32 = 9;

/// Round `value` to a fixed number of digits below the leading digit of
/// `spacing`, so grids built by multiplication carry no float noise
pub(crate) fn snap(value: f64, spacing: f64) -> f64 {
    if !spacing.is_finite() || spacing == 0.0 {
        return value;
    }
    let digits = SNAP_DIGITS - spacing.abs().log10().floor() as i32;
    let snapped = if digits >= 0 {
        let factor = 10f64.powi(digits);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-digits);
        (value / factor).round() * factor
    };
    if !snapped.is_finite() {
        value
    } else if snapped == 0.0 {
        0.0
    } else {
        snapped
    }
}

/// Greatest common divisor of two non-negative floats via repeated modulo
pub(crate) fn float_gcd(a: f64, b: f64, tolerance: f64) -> f64 {
    let (mut a, mut b) = (a.abs().max(b.abs()), a.abs().min(b.abs()));
    while b > tolerance {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// GCD of the successive differences of the sorted, de-duplicated values
pub(crate) fn difference_gcd(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();

    let diffs: Vec<f64> = sorted.windows(2).map(|w| w[1] - w[0]).collect();
    let largest = diffs.iter().copied().fold(0.0, f64::max);
    if largest <= 0.0 {
        return None;
    }
    let tolerance = largest * GCD_TOLERANCE;
    let gcd = diffs
        .iter()
        .copied()
        .fold(0.0, |acc, d| float_gcd(acc, d, tolerance));
    (gcd > 0.0).then_some(gcd)
}

/// Uniform ticks that land exactly on `min` and `max`, spaced by a doubling
/// multiple of half the values' difference GCD.
///
/// Returns `None` when no multiple gives a whole tick count in
/// `MIN_TICKS..=MAX_TICKS` within [`MAX_DOUBLINGS`] tries.
pub(crate) fn exact_fit(values: &[f64], min: f64, max: f64) -> Option<Vec<f64>> {
    let range = max - min;
    let gcd = difference_gcd(values)?;
    if gcd < range * GCD_TOLERANCE {
        return None;
    }

    for doubling in 0..MAX_DOUBLINGS {
        let spacing = 0.5 * gcd * 2f64.powi(doubling as i32);
        let intervals = range / spacing;
        let whole = intervals.round();
        let ticks = whole as usize + 1;
        trace!(spacing, intervals, "exact-fit candidate");

        if ticks < MIN_TICKS {
            break;
        }
        if (intervals - whole).abs() > 1e-6 * whole.max(1.0) || ticks > MAX_TICKS {
            continue;
        }

        let count = whole as usize;
        let mut locations: Vec<f64> = (0..=count)
            .map(|i| snap(min + i as f64 * spacing, spacing))
            .collect();
        if let Some(first) = locations.first_mut() {
            *first = min;
        }
        if let Some(last) = locations.last_mut() {
            *last = max;
        }
        return Some(locations);
    }
    None
}

/// Nice-number ticks around `[min, max]`.
///
/// Spacings are tried from the finest multiplier of the range's power of ten
/// upwards; the first with at most `MAX_TICKS` ticks wins unless the previous
/// (finer) spacing was closer to the `MIN_TICKS..=MAX_TICKS` band.
pub(crate) fn general(min: f64, max: f64, tight: bool) -> Vec<f64> {
    let range = max - min;
    let magnitude = 10f64.powi((range.log10() + GRID_EPSILON).floor() as i32);

    let mut previous: Option<Vec<f64>> = None;
    for multiplier in STEP_MULTIPLIERS {
        let spacing = multiplier * magnitude;
        let ticks = grid(min, max, spacing, tight);
        trace!(spacing, count = ticks.len(), tight, "general candidate");

        if ticks.len() <= MAX_TICKS {
            return match previous {
                Some(finer) if band_distance(finer.len()) < band_distance(ticks.len()) => finer,
                _ => ticks,
            };
        }
        previous = Some(ticks);
    }
    // The coarsest multiplier exceeds the range, so the loop always returns
    grid(min, max, 10.0 * magnitude, tight)
}

/// How far a tick count is from the accepted band
fn band_distance(count: usize) -> usize {
    if count < MIN_TICKS {
        MIN_TICKS - count
    } else {
        count.saturating_sub(MAX_TICKS)
    }
}

/// Grid multiples of `spacing` covering `[min, max]`.
///
/// Non-tight grids start and stop on the multiples just outside the data.
/// Tight grids put the first and last tick on `min` and `max` and drop grid
/// ticks closer than a third of a spacing to either end.
pub(crate) fn grid(min: f64, max: f64, spacing: f64, tight: bool) -> Vec<f64> {
    let first = (min / spacing + GRID_EPSILON).floor() as i64;
    let last = (max / spacing - GRID_EPSILON).ceil() as i64;
    let tick = |i: i64| {
        let value = i as f64 * spacing;
        if value.abs() < spacing * GRID_EPSILON {
            0.0
        } else {
            snap(value, spacing)
        }
    };

    if !tight {
        return (first..=last).map(tick).collect();
    }

    let margin = spacing / 3.0;
    let mut ticks = vec![min];
    ticks.extend(
        (first..=last)
            .map(tick)
            .filter(|&v| v - min > margin && max - v > margin),
    );
    ticks.push(max);
    ticks
}

//! Tick engine: numeric values -> scale, unit prefix, tick positions and labels

mod engineering;
mod labels;
mod spacing;

pub use engineering::EngScale;

use tracing::{debug, trace};

use crate::error::TickError;

/// Fewest ticks the linear search accepts
pub const MIN_TICKS: usize = 6;
/// Most ticks the linear search accepts
pub const MAX_TICKS: usize = 10;

/// Relative step used around a single repeated value
const SINGLE_VALUE_STEP: f64 = 0.1;
/// Absolute step used when the single value is zero
const ZERO_VALUE_STEP: f64 = 0.1;

/// Output of one tick computation.
///
/// `locations`, `axis_min` and `axis_max` are already divided by `scale`.
/// `labels` has one entry per location; on logarithmic axes the padding
/// decades have empty labels, every other label is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub locations: Vec<f64>,
    pub labels: Vec<String>,
    pub axis_min: f64,
    pub axis_max: f64,
    pub scale: f64,
    pub unit_prefix: String,
    pub log: bool,
}

impl TickResult {
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of labeled ticks (padding decades excluded)
    pub fn labeled(&self) -> usize {
        self.labels.iter().filter(|l| !l.is_empty()).count()
    }

    /// Re-derive `intervals + 1` evenly spaced locations between the current
    /// first and last tick and relabel them, keeping the scale and prefix.
    pub fn resampled(&self, intervals: usize) -> TickResult {
        let (first, last) = match (self.locations.first(), self.locations.last()) {
            (Some(&first), Some(&last)) if intervals > 0 => (first, last),
            _ => return self.clone(),
        };
        let step = (last - first) / intervals as f64;
        let mut locations: Vec<f64> = (0..=intervals)
            .map(|i| spacing::snap(first + i as f64 * step, step))
            .collect();
        locations[0] = first;
        locations[intervals] = last;
        let labels = labels::unique_labels(&locations);
        TickResult {
            locations,
            labels,
            axis_min: self.axis_min.min(first),
            axis_max: self.axis_max.max(last),
            ..self.clone()
        }
    }
}

/// Compute ticks for `values` observed over `[observed_min, observed_max]`.
///
/// `tight` clamps the outer ticks to the observed range; `log_axis` places
/// ticks on powers of ten and requires every value to be positive.
pub fn compute(
    values: &[f64],
    observed_min: f64,
    observed_max: f64,
    tight: bool,
    log_axis: bool,
) -> Result<TickResult, TickError> {
    if values.is_empty() {
        return Err(TickError::DegenerateRange);
    }
    if !observed_min.is_finite()
        || !observed_max.is_finite()
        || observed_min > observed_max
        || !(observed_max - observed_min).is_finite()
    {
        return Err(TickError::InvalidBounds {
            min: observed_min,
            max: observed_max,
        });
    }
    if log_axis {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| **v <= 0.0) {
            return Err(TickError::Domain { index, value });
        }
        if observed_min <= 0.0 {
            return Err(TickError::InvalidBounds {
                min: observed_min,
                max: observed_max,
            });
        }
        let single = observed_min == observed_max;
        return Ok(logarithmic(observed_min, observed_max, tight && !single));
    }

    if observed_min == observed_max {
        let value = observed_min;
        let step = if value == 0.0 {
            ZERO_VALUE_STEP
        } else {
            value.abs() * SINGLE_VALUE_STEP
        };
        debug!(value, step, "single-value ticks");
        let ticks = vec![value - step, value, value + step];
        if ticks.iter().any(|t| !t.is_finite()) {
            return Err(TickError::InvalidBounds {
                min: observed_min,
                max: observed_max,
            });
        }
        return Ok(finish_linear(ticks, false, observed_min, observed_max));
    }

    let exact = if tight {
        spacing::exact_fit(values, observed_min, observed_max)
    } else {
        None
    };
    let ticks = match exact {
        Some(ticks) => {
            debug!(count = ticks.len(), "exact-fit ticks");
            ticks
        }
        None => {
            let ticks = spacing::general(observed_min, observed_max, tight);
            debug!(count = ticks.len(), tight, "general-case ticks");
            ticks
        }
    };
    Ok(finish_linear(ticks, tight, observed_min, observed_max))
}

/// Convenience wrapper taking the observed range from the values themselves
pub fn compute_auto(values: &[f64], tight: bool, log_axis: bool) -> Result<TickResult, TickError> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if values.is_empty() {
        return Err(TickError::DegenerateRange);
    }
    compute(values, min, max, tight, log_axis)
}

/// Pick the scale, then label the scaled locations
fn finish_linear(ticks: Vec<f64>, tight: bool, observed_min: f64, observed_max: f64) -> TickResult {
    let scale = select_scale(&ticks);
    let locations: Vec<f64> = ticks.iter().map(|t| t / scale.factor).collect();
    let labels = labels::unique_labels(&locations);

    let (raw_min, raw_max) = if tight {
        (observed_min, observed_max)
    } else {
        (
            ticks[0].min(observed_min),
            ticks[ticks.len() - 1].max(observed_max),
        )
    };
    debug!(
        count = locations.len(),
        scale = scale.factor,
        prefix = scale.prefix,
        "linear ticks ready"
    );
    TickResult {
        locations,
        labels,
        axis_min: raw_min / scale.factor,
        axis_max: raw_max / scale.factor,
        scale: scale.factor,
        unit_prefix: scale.prefix.to_string(),
        log: false,
    }
}

/// Choose among the delta-, min- and max-referenced scales the one with the
/// fewest rendered label characters; ties go to the delta reference.
fn select_scale(ticks: &[f64]) -> EngScale {
    let first = ticks[0];
    let last = ticks[ticks.len() - 1];
    let delta = if ticks.len() > 1 { ticks[1] - ticks[0] } else { first };

    let cost = |scale: &EngScale| {
        let scaled: Vec<f64> = ticks.iter().map(|t| t / scale.factor).collect();
        labels::char_count(&labels::unique_labels(&scaled))
    };

    let candidates = [
        EngScale::for_value(delta),
        EngScale::for_value(first),
        EngScale::for_value(last),
    ];
    let mut best = candidates[0];
    let mut best_cost = cost(&best);
    for candidate in &candidates[1..] {
        let candidate_cost = cost(candidate);
        trace!(prefix = candidate.prefix, candidate_cost, best_cost, "scale candidate");
        if candidate_cost < best_cost {
            best = *candidate;
            best_cost = candidate_cost;
        }
    }

    if let Some(coarser) = best.coarser() {
        let large = ticks
            .iter()
            .filter(|t| (*t / best.factor).abs() >= 1000.0)
            .count();
        if large * 2 > ticks.len() && cost(&coarser) <= best_cost {
            trace!(prefix = coarser.prefix, "rolling back to coarser unit");
            best = coarser;
        }
    }
    best
}

/// Decade ticks from `floor(log10(min))` to `ceil(log10(max))`, padded by one
/// unlabeled decade on each side the data touches when not tight
fn logarithmic(observed_min: f64, observed_max: f64, tight: bool) -> TickResult {
    let low = (observed_min.log10() + 1e-12).floor() as i32;
    let high = (observed_max.log10() - 1e-12).ceil() as i32;
    let high = high.max(low);

    let mut decades: Vec<(i32, bool)> = (low..=high).map(|e| (e, true)).collect();
    if !tight {
        if 10f64.powi(low) >= observed_min * (1.0 - 1e-12) {
            decades.insert(0, (low - 1, false));
        }
        if 10f64.powi(high) <= observed_max * (1.0 + 1e-12) {
            decades.push((high + 1, false));
        }
    }

    let locations: Vec<f64> = decades.iter().map(|&(e, _)| 10f64.powi(e)).collect();
    let labels: Vec<String> = decades
        .iter()
        .map(|&(e, labeled)| if labeled { decade_label(e) } else { String::new() })
        .collect();
    debug!(low, high, count = locations.len(), tight, "log ticks ready");

    TickResult {
        axis_min: locations[0],
        axis_max: locations[locations.len() - 1],
        locations,
        labels,
        scale: 1.0,
        unit_prefix: String::new(),
        log: true,
    }
}

/// Plain decimals for 0.001..=1000, exponent notation beyond
fn decade_label(exponent: i32) -> String {
    if (-3..=3).contains(&exponent) {
        labels::format_label(10f64.powi(exponent), exponent.min(0).unsigned_abs() as usize)
    } else {
        format!("1e{}", exponent)
    }
}

/// Relabel scaled locations with the uniqueness search
pub fn relabel(locations: &[f64]) -> Vec<String> {
    labels::unique_labels(locations)
}

#[cfg(test)]
mod tests;

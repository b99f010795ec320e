//! "Nice number" interval selection for legend and axis breaks.
//!
//! Given a data range, picks an interval from the 1, 2, 2.5, 5, 10 ladder
//! (scaled by powers of ten) targeting about five divisions, then snaps the
//! range outward to multiples of that interval.

use serde::{Deserialize, Serialize};

/// Seed for the ladder search; also the interval of a degenerate range.
const INITIAL_FACTOR: f64 = 0.01;

/// Approximate number of divisions the interval aims for.
const TARGET_DIVISIONS: f64 = 5.0;

/// Fraction of an interval below which a snapped bound is pushed one more
/// interval out, leaving room between the data and the outer label.
const INTERVAL_SHIFT: f64 = 0.67;

/// Factors below this use 2× instead of 2.5× for deltas in (2×, 2.5×].
const QUARTER_STEP_THRESHOLD: f64 = 10.0;

/// Snapped range and interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalSpec {
    pub min: f64,
    pub max: f64,
    pub interval: f64,
}

impl IntervalSpec {
    /// Class boundaries from `min` to `max` inclusive.
    pub fn breaks(&self) -> Vec<f64> {
        let invalid = !self.interval.is_finite()
            || self.interval <= 0.0
            || self.min.is_nan()
            || self.max.is_nan()
            || self.max < self.min;
        if invalid {
            return vec![self.min];
        }
        let steps = ((self.max - self.min) / self.interval).round() as usize;
        (0..=steps)
            .map(|i| self.min + i as f64 * self.interval)
            .collect()
    }

    /// Number of classes between `min` and `max`.
    pub fn class_count(&self) -> usize {
        self.breaks().len().saturating_sub(1)
    }
}

/// Choose a human-friendly interval and snapped bounds for `[min_value, max_value]`.
pub fn select_interval(min_value: f64, max_value: f64) -> IntervalSpec {
    let interval = nice_interval((max_value - min_value) / TARGET_DIVISIONS);

    IntervalSpec {
        min: snap_min(min_value, interval),
        max: snap_max(max_value, interval),
        interval,
    }
}

fn nice_interval(delta: f64) -> f64 {
    let mut factor = INITIAL_FACTOR;
    let mut interval = INITIAL_FACTOR;

    while delta > factor {
        interval = if delta <= factor {
            factor
        } else if delta <= factor * 2.0 {
            factor * 2.0
        } else if delta <= factor * 2.5 {
            if factor < QUARTER_STEP_THRESHOLD {
                factor * 2.0
            } else {
                factor * 2.5
            }
        } else if delta <= factor * 5.0 {
            factor * 5.0
        } else {
            factor * 10.0
        };
        factor *= 10.0;
    }

    interval
}

fn snap_max(max_value: f64, interval: f64) -> f64 {
    let count = (max_value / interval).floor();
    let mut value = count * interval;
    if max_value > value {
        value = (count + 1.0) * interval;
    }

    if (max_value - value).abs() <= INTERVAL_SHIFT * interval {
        value + interval
    } else {
        value
    }
}

fn snap_min(min_value: f64, interval: f64) -> f64 {
    let count = (min_value / interval).floor();
    let mut value = count * interval;
    if min_value < value {
        value = (count - 1.0) * interval;
    }

    if (min_value - value).abs() <= INTERVAL_SHIFT * interval {
        value - interval
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn assert_spec(spec: IntervalSpec, min: f64, max: f64, interval: f64) {
        assert_close(spec.min, min);
        assert_close(spec.max, max);
        assert_close(spec.interval, interval);
    }

    #[test]
    fn test_unit_range() {
        assert_spec(select_interval(0.0, 1.0), -0.2, 1.2, 0.2);
    }

    #[test]
    fn test_degenerate_range_keeps_seed() {
        let spec = select_interval(10.0, 10.0);
        assert!(spec.interval > 0.0);
        assert_spec(spec, 9.99, 10.01, 0.01);
    }

    #[test]
    fn test_hundred_range() {
        assert_spec(select_interval(0.0, 100.0), -20.0, 120.0, 20.0);
    }

    #[test]
    fn test_small_factor_uses_two_instead_of_two_and_half() {
        // delta 2.2 falls in (2, 2.5] with factor 1
        assert_spec(select_interval(0.0, 11.0), -2.0, 14.0, 2.0);
    }

    #[test]
    fn test_large_factor_uses_two_and_half() {
        // delta 240 falls in (200, 250] with factor 100
        assert_spec(select_interval(0.0, 1200.0), -250.0, 1500.0, 250.0);
    }

    #[test]
    fn test_negative_minimum() {
        assert_spec(select_interval(-7.0, 3.0), -10.0, 6.0, 2.0);
    }

    #[test]
    fn test_max_far_from_candidate_is_not_extended() {
        // interval 20; 81 rounds up to 100, 19 away which is > 0.67 * 20
        let spec = select_interval(0.0, 81.0);
        assert_close(spec.interval, 20.0);
        assert_close(spec.max, 100.0);
    }

    #[test]
    fn test_reversed_range_terminates() {
        let spec = select_interval(50.0, 10.0);
        assert!(spec.interval > 0.0);
    }

    #[test]
    fn test_breaks() {
        let spec = select_interval(0.0, 100.0);
        let breaks = spec.breaks();
        assert_eq!(breaks.len(), 8);
        assert_close(breaks[0], -20.0);
        assert_close(breaks[7], 120.0);
        assert_eq!(spec.class_count(), 7);
    }
}

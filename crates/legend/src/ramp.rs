//! Class colour ramps.
//!
//! A ramp splits the span between two colours into a fixed number of
//! classes; values are then bucketed into a class by their position between
//! a minimum and maximum.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Deep blue end of the water-level ramp.
pub const WATER_LEVEL_LOW: Rgb = Rgb::new(0, 0, 224);

/// Pale blue end of the water-level ramp.
pub const WATER_LEVEL_HIGH: Rgb = Rgb::new(204, 204, 255);

/// Number of classes on the water-level ramp.
pub const WATER_LEVEL_CLASSES: usize = 30;

/// Linear ramp between two colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRamp {
    pub start: Rgb,
    pub end: Rgb,
    pub classes: usize,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::water_level()
    }
}

impl ColorRamp {
    pub fn new(start: Rgb, end: Rgb, classes: usize) -> Self {
        Self {
            start,
            end,
            classes,
        }
    }

    /// The ramp used for water-table elevation cells.
    pub fn water_level() -> Self {
        Self::new(WATER_LEVEL_LOW, WATER_LEVEL_HIGH, WATER_LEVEL_CLASSES)
    }

    /// Same endpoints, different class count.
    pub fn with_classes(mut self, classes: usize) -> Self {
        self.classes = classes;
        self
    }

    /// One colour per class.
    ///
    /// Class `i` takes `start + i * (end - start) / classes` per channel,
    /// truncated and clamped to the endpoint range, so the last class stops
    /// one step short of `end`.
    pub fn allocate_colors(&self) -> Vec<Rgb> {
        let n = self.classes as f64;
        let channel = |lo: u8, hi: u8, i: usize| {
            let (lo, hi) = (lo as f64, hi as f64);
            let step = (hi - lo) / n;
            let value = (lo + i as f64 * step).trunc();
            value.clamp(lo.min(hi), lo.max(hi)) as u8
        };

        (0..self.classes)
            .map(|i| {
                Rgb::new(
                    channel(self.start.r, self.end.r, i),
                    channel(self.start.g, self.end.g, i),
                    channel(self.start.b, self.end.b, i),
                )
            })
            .collect()
    }

    /// Colour of `value` within `[min, max]`.
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> Option<Rgb> {
        if self.classes == 0 {
            return None;
        }
        let class = determine_class(value, min, max, self.classes);
        self.allocate_colors().get(class).copied()
    }
}

/// Class index of `value` within `[min, max]` split into `classes` buckets.
///
/// Values below `min` fall in class 0 and values at or above `max` in the
/// last class. A zero-width range or NaN input yields class 0.
pub fn determine_class(value: f64, min: f64, max: f64, classes: usize) -> usize {
    if classes == 0 {
        return 0;
    }
    let position = classes as f64 * (value - min) / (max - min).abs();
    if !position.is_finite() || position <= 0.0 {
        return 0;
    }
    (position.trunc() as usize).min(classes - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_level_ramp() {
        let colors = ColorRamp::water_level().allocate_colors();
        assert_eq!(colors.len(), 30);
        assert_eq!(colors[0], Rgb::new(0, 0, 224));
        // 204/30 = 6.8 per class, 31/30 per class for blue
        assert_eq!(colors[1], Rgb::new(6, 6, 225));
        assert_eq!(colors[15], Rgb::new(102, 102, 239));
        assert_eq!(colors[29], Rgb::new(197, 197, 253));
    }

    #[test]
    fn test_descending_ramp_stays_in_range() {
        let ramp = ColorRamp::new(Rgb::new(255, 100, 0), Rgb::new(0, 100, 255), 4);
        let colors = ramp.allocate_colors();
        assert_eq!(colors[0], Rgb::new(255, 100, 0));
        assert_eq!(colors[3], Rgb::new(63, 100, 191));
    }

    #[test]
    fn test_determine_class() {
        assert_eq!(determine_class(0.0, 0.0, 30.0, 30), 0);
        assert_eq!(determine_class(15.5, 0.0, 30.0, 30), 15);
        assert_eq!(determine_class(30.0, 0.0, 30.0, 30), 29);
        assert_eq!(determine_class(99.0, 0.0, 30.0, 30), 29);
        assert_eq!(determine_class(-5.0, 0.0, 30.0, 30), 0);
        assert_eq!(determine_class(5.0, 5.0, 5.0, 30), 0);
        assert_eq!(determine_class(f64::NAN, 0.0, 1.0, 30), 0);
        assert_eq!(determine_class(1.0, 0.0, 1.0, 0), 0);
    }

    #[test]
    fn test_color_for() {
        let ramp = ColorRamp::water_level();
        assert_eq!(ramp.color_for(150.0, 150.0, 210.0), Some(WATER_LEVEL_LOW));
        assert_eq!(ramp.color_for(210.0, 150.0, 210.0), Some(Rgb::new(197, 197, 253)));
        assert_eq!(ramp.with_classes(0).color_for(1.0, 0.0, 2.0), None);
    }
}

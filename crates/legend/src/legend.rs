//! Legends: labelled classes with colours.

use serde::{Deserialize, Serialize};
use stack_query::{select_interval, IntervalSpec};

use crate::color::Rgb;
use crate::error::LegendResult;
use crate::ramp::ColorRamp;
use crate::specification::ColorSpecification;

/// One legend row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendClass {
    /// Lower bound, or the exact value for specification legends.
    pub lower: f64,
    /// Upper bound; `None` for specification legends.
    pub upper: Option<f64>,
    pub color: Rgb,
    /// `#rrggbb` form of `color`.
    pub hex: String,
    pub label: String,
}

impl LegendClass {
    fn new(lower: f64, upper: Option<f64>, color: Rgb, label: String) -> Self {
        Self {
            lower,
            upper,
            color,
            hex: color.to_hex(),
            label,
        }
    }
}

/// An ordered set of legend classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: Option<String>,
    /// Interval the classes were built from, for range legends.
    pub interval: Option<IntervalSpec>,
    pub classes: Vec<LegendClass>,
}

impl Legend {
    /// Range legend for `[min, max]`: nice breaks from [`select_interval`],
    /// one ramp colour per class.
    pub fn for_range(min: f64, max: f64, ramp: &ColorRamp) -> Self {
        Self::from_interval(select_interval(min, max), ramp)
    }

    /// Range legend from precomputed breaks. The ramp's class count is
    /// replaced by the number of classes between the breaks.
    pub fn from_interval(spec: IntervalSpec, ramp: &ColorRamp) -> Self {
        let breaks = spec.breaks();
        let colors = ramp.with_classes(spec.class_count()).allocate_colors();
        let decimals = label_decimals(spec.interval);

        let classes = breaks
            .windows(2)
            .zip(colors)
            .map(|(bounds, color)| {
                let label = format!("{:.*} to {:.*}", decimals, bounds[0], decimals, bounds[1]);
                LegendClass::new(bounds[0], Some(bounds[1]), color, label)
            })
            .collect();

        Self {
            title: None,
            interval: Some(spec),
            classes,
        }
    }

    /// Categorical legend, one class per specification entry.
    pub fn from_specification(spec: &ColorSpecification) -> LegendResult<Self> {
        let classes = spec
            .entries
            .iter()
            .map(|entry| {
                let color = spec.rgb(entry)?;
                Ok(LegendClass::new(entry.value, None, color, entry.description.clone()))
            })
            .collect::<LegendResult<Vec<_>>>()?;

        Ok(Self {
            title: Some(spec.description.clone()),
            interval: None,
            classes,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Class a value belongs to.
    ///
    /// Range classes include their lower bound; the last also includes its
    /// upper bound. Specification classes match exact values.
    pub fn class_for(&self, value: f64) -> Option<&LegendClass> {
        let last = self.classes.len().checked_sub(1)?;
        self.classes.iter().enumerate().find_map(|(i, class)| {
            let hit = match class.upper {
                Some(upper) if i == last => value >= class.lower && value <= upper,
                Some(upper) => value >= class.lower && value < upper,
                None => value == class.lower,
            };
            hit.then_some(class)
        })
    }
}

/// Decimals needed to print multiples of `interval` without noise.
fn label_decimals(interval: f64) -> usize {
    if !interval.is_finite() || interval <= 0.0 {
        return 0;
    }
    (0..=6)
        .find(|&d| {
            let scaled = interval * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-9
        })
        .unwrap_or(6)
}

//! Uncertainty classes for the uncertainty layer of a stack.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the low class.
pub const LOW_UPPER: f64 = 0.33;

/// Upper bound (inclusive) of the moderate class.
pub const MODERATE_UPPER: f64 = 0.67;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UncertaintyClass {
    Low,
    Moderate,
    High,
}

impl UncertaintyClass {
    /// Classify an uncertainty value, rounded to three decimals first.
    pub fn classify(value: f64) -> Self {
        let value = (value * 1000.0).round() / 1000.0;
        if value <= LOW_UPPER {
            UncertaintyClass::Low
        } else if value <= MODERATE_UPPER {
            UncertaintyClass::Moderate
        } else {
            UncertaintyClass::High
        }
    }

    /// Label shown next to a queried cell.
    pub fn label(&self) -> &'static str {
        match self {
            UncertaintyClass::Low => "Low (< 0.34)",
            UncertaintyClass::Moderate => "Moderate (0.34 to 0.67)",
            UncertaintyClass::High => "High (> 0.67)",
        }
    }
}

impl fmt::Display for UncertaintyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

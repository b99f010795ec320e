//! Configuration for stack queries.

use serde::{Deserialize, Serialize};

use crate::extract::DEFAULT_NODATA;

/// Settings passed explicitly to every stack query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Decimal places used when capturing and comparing grid origins.
    pub origin_precision: u32,

    /// Decimal places kept on extracted cell values.
    pub value_precision: u32,

    /// Sentinel assigned to layers that declare no nodata value.
    pub default_nodata: f64,

    /// Band read from every layer (1-based).
    pub band: usize,

    /// Scan the band for min/max when the layer has no stored statistics.
    pub compute_statistics: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            origin_precision: 3,
            value_precision: 3,
            default_nodata: DEFAULT_NODATA,
            band: 1,
            compute_statistics: true,
        }
    }
}

impl QueryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("STACK_ORIGIN_PRECISION") {
            if let Ok(precision) = val.parse() {
                config.origin_precision = precision;
            }
        }

        if let Ok(val) = std::env::var("STACK_VALUE_PRECISION") {
            if let Ok(precision) = val.parse() {
                config.value_precision = precision;
            }
        }

        if let Ok(val) = std::env::var("STACK_DEFAULT_NODATA") {
            if let Ok(nodata) = val.parse() {
                config.default_nodata = nodata;
            }
        }

        if let Ok(val) = std::env::var("STACK_BAND") {
            if let Ok(band) = val.parse() {
                config.band = band;
            }
        }

        if let Ok(val) = std::env::var("STACK_COMPUTE_STATISTICS") {
            config.compute_statistics = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.band == 0 {
            return Err("band must be >= 1".to_string());
        }

        if self.origin_precision > 12 {
            return Err("origin_precision must be 0-12".to_string());
        }

        if self.value_precision > 12 {
            return Err("value_precision must be 0-12".to_string());
        }

        if !self.default_nodata.is_finite() {
            return Err("default_nodata must be a finite number".to_string());
        }

        Ok(())
    }
}

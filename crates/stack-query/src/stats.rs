//! Per-layer minimum/maximum statistics.

use tracing::debug;

use crate::config::QueryConfig;
use crate::error::{Result, StackError};
use crate::extract::FLOAT32_MIN_SENTINEL;
use crate::layer::RasterLayer;

/// Statistics reported alongside a layer's cell value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayerStatistics {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    /// Nodata sentinel to report for the layer.
    pub nodata: Option<f64>,
}

/// Resolve the minimum and maximum of a layer's configured band.
///
/// Stored statistics are preferred; otherwise the band is scanned when
/// `config.compute_statistics` is set. A minimum equal to the float32 minimum
/// sentinel is not a real minimum: it is dropped and the sentinel is reported
/// as the layer's nodata value instead.
pub fn resolve_statistics(layer: &dyn RasterLayer, config: &QueryConfig) -> Result<LayerStatistics> {
    let nodata = layer.nodata().unwrap_or(config.default_nodata);

    let min_max = match layer.stored_min_max(config.band) {
        Some(stored) => Some(stored),
        None if config.compute_statistics => {
            let band = layer
                .read_band(config.band)
                .map_err(|e| StackError::raster_access(layer.name(), e))?;
            compute_min_max(&band, nodata)
        }
        None => None,
    };

    let mut stats = LayerStatistics {
        minimum: min_max.map(|(min, _)| min),
        maximum: min_max.map(|(_, max)| max),
        nodata: Some(nodata),
    };

    if stats.minimum == Some(FLOAT32_MIN_SENTINEL) {
        stats.minimum = None;
        stats.nodata = Some(FLOAT32_MIN_SENTINEL);
    }

    debug!(
        layer = layer.name(),
        minimum = ?stats.minimum,
        maximum = ?stats.maximum,
        nodata = ?stats.nodata,
        "Layer statistics"
    );
    Ok(stats)
}

/// Minimum and maximum of `values`, skipping NaN and `nodata` cells.
pub fn compute_min_max(values: &[f64], nodata: f64) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan() && *v != nodata)
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::MemoryLayer;
    use crate::types::GeoTransform;

    fn transform() -> GeoTransform {
        GeoTransform::new(0.0, 20.0, 10.0, -10.0)
    }

    #[test]
    fn test_compute_min_max_skips_nodata() {
        let values = [-9999.0, 3.0, f64::NAN, 12.5, -2.0];
        assert_eq!(compute_min_max(&values, -9999.0), Some((-2.0, 12.5)));
    }

    #[test]
    fn test_compute_min_max_all_nodata() {
        assert_eq!(compute_min_max(&[-9999.0; 4], -9999.0), None);
        assert_eq!(compute_min_max(&[], -9999.0), None);
    }

    #[test]
    fn test_stored_statistics_preferred() {
        let layer = MemoryLayer::new("lsd", transform(), 2, 2, vec![1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .with_statistics(0.5, 99.0);
        let stats = resolve_statistics(&layer, &QueryConfig::default()).unwrap();
        assert_eq!(stats.minimum, Some(0.5));
        assert_eq!(stats.maximum, Some(99.0));
        assert_eq!(stats.nodata, Some(-9999.0));
    }

    #[test]
    fn test_computed_statistics() {
        let layer = MemoryLayer::new("dtw", transform(), 2, 2, vec![1.0, -5.0, 3.0, 40.0])
            .unwrap()
            .with_nodata(-5.0);
        let stats = resolve_statistics(&layer, &QueryConfig::default()).unwrap();
        assert_eq!(stats.minimum, Some(1.0));
        assert_eq!(stats.maximum, Some(40.0));
        assert_eq!(stats.nodata, Some(-5.0));
    }

    #[test]
    fn test_float_min_sentinel_minimum_is_dropped() {
        let layer = MemoryLayer::new(
            "wtele",
            transform(),
            2,
            2,
            vec![FLOAT32_MIN_SENTINEL, 10.0, 20.0, 30.0],
        )
        .unwrap();
        let stats = resolve_statistics(&layer, &QueryConfig::default()).unwrap();
        assert_eq!(stats.minimum, None);
        assert_eq!(stats.maximum, Some(30.0));
        assert_eq!(stats.nodata, Some(FLOAT32_MIN_SENTINEL));
    }

    #[test]
    fn test_statistics_disabled() {
        let layer = MemoryLayer::filled("uncer", transform(), 2, 2, 0.5);
        let config = QueryConfig {
            compute_statistics: false,
            ..Default::default()
        };
        let stats = resolve_statistics(&layer, &config).unwrap();
        assert_eq!(stats.minimum, None);
        assert_eq!(stats.maximum, None);
    }
}

//! Single-cell value extraction with nodata handling.

use tracing::trace;

use crate::config::QueryConfig;
use crate::error::{Result, StackError};
use crate::layer::RasterLayer;
use crate::types::{round_to, CellIndex};

/// Sentinel assigned to layers that declare no nodata value.
pub const DEFAULT_NODATA: f64 = -9999.0;

/// Lowest single-precision float, written by many tools as "no data"
/// regardless of the declared nodata field (-3.4028234663852886e38).
pub const FLOAT32_MIN_SENTINEL: f64 = f32::MIN as f64;

/// Value read from one layer at one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtractedValue {
    /// Cell value rounded to the configured precision, `None` for nodata.
    pub value: Option<f64>,
    /// Nodata sentinel in effect for the layer, `None` when the cell was
    /// outside the layer.
    pub nodata: Option<f64>,
}

/// Whether a raw cell value marks missing data.
///
/// Both the declared sentinel and the float32 minimum are checked because
/// rasters do not populate the nodata field consistently.
pub fn is_nodata(raw: f64, nodata: f64) -> bool {
    raw.is_nan() || raw == nodata || raw == FLOAT32_MIN_SENTINEL
}

/// Read the value of `cell` from `layer`.
///
/// A cell outside the layer yields `(None, None)` rather than an error.
pub fn extract_value(
    layer: &dyn RasterLayer,
    cell: CellIndex,
    config: &QueryConfig,
) -> Result<ExtractedValue> {
    let in_bounds = cell.column >= 0
        && cell.row >= 0
        && (cell.column as u64) < layer.columns() as u64
        && (cell.row as u64) < layer.rows() as u64;
    if !in_bounds {
        trace!(layer = layer.name(), ?cell, "Cell outside layer");
        return Ok(ExtractedValue::default());
    }

    let nodata = layer.nodata().unwrap_or(config.default_nodata);

    let raw = layer
        .read_cell(config.band, cell.column as usize, cell.row as usize)
        .map_err(|e| StackError::raster_access(layer.name(), e))?;

    let value = if is_nodata(raw, nodata) {
        None
    } else {
        Some(round_to(raw, config.value_precision))
    };

    trace!(layer = layer.name(), raw, ?value, nodata, "Extracted cell value");
    Ok(ExtractedValue {
        value,
        nodata: Some(nodata),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::MemoryLayer;
    use crate::types::GeoTransform;

    fn layer() -> MemoryLayer {
        let data = (0..12).map(|i| i as f64 + 0.12345).collect();
        MemoryLayer::new("lsd", GeoTransform::new(0.0, 30.0, 10.0, -10.0), 3, 4, data).unwrap()
    }

    #[test]
    fn test_value_rounded_to_three_decimals() {
        let out = extract_value(&layer(), CellIndex::new(1, 2), &QueryConfig::default()).unwrap();
        assert_eq!(out.value, Some(6.123));
        assert_eq!(out.nodata, Some(DEFAULT_NODATA));
    }

    #[test]
    fn test_out_of_range_indices_yield_nothing() {
        let config = QueryConfig::default();
        for cell in [
            CellIndex::new(-1, 0),
            CellIndex::new(0, -1),
            CellIndex::new(3, 0),
            CellIndex::new(0, 4),
            CellIndex::new(100, 100),
        ] {
            let out = extract_value(&layer(), cell, &config).unwrap();
            assert_eq!(out, ExtractedValue::default(), "cell {:?}", cell);
        }
    }

    #[test]
    fn test_declared_nodata_is_null() {
        let mut l = layer().with_nodata(-1.0);
        l.set_cell(0, 0, -1.0).unwrap();
        let out = extract_value(&l, CellIndex::new(0, 0), &QueryConfig::default()).unwrap();
        assert_eq!(out.value, None);
        assert_eq!(out.nodata, Some(-1.0));
    }

    #[test]
    fn test_default_nodata_applied() {
        let mut l = layer();
        l.set_cell(0, 0, -9999.0).unwrap();
        let out = extract_value(&l, CellIndex::new(0, 0), &QueryConfig::default()).unwrap();
        assert_eq!(out.value, None);
        assert_eq!(out.nodata, Some(-9999.0));
    }

    #[test]
    fn test_float_min_sentinel_is_null_even_with_other_nodata() {
        let mut l = layer().with_nodata(-9999.0);
        l.set_cell(3, 2, FLOAT32_MIN_SENTINEL).unwrap();
        let out = extract_value(&l, CellIndex::new(2, 3), &QueryConfig::default()).unwrap();
        assert_eq!(out.value, None);
        assert_eq!(out.nodata, Some(-9999.0));
        assert_eq!(FLOAT32_MIN_SENTINEL, -3.4028234663852886e38);
    }

    #[test]
    fn test_nan_is_null() {
        let mut l = layer();
        l.set_cell(1, 1, f64::NAN).unwrap();
        let out = extract_value(&l, CellIndex::new(1, 1), &QueryConfig::default()).unwrap();
        assert_eq!(out.value, None);
    }

    #[test]
    fn test_huge_value_kept_finite() {
        let mut l = layer();
        l.set_cell(2, 1, 1.0e306).unwrap();
        let out = extract_value(&l, CellIndex::new(1, 2), &QueryConfig::default()).unwrap();
        assert_eq!(out.value, Some(1.0e306));
    }

    #[test]
    fn test_configured_band_and_precision() {
        let l = layer().with_band(vec![7.77777; 12]).unwrap();
        let config = QueryConfig {
            band: 2,
            value_precision: 1,
            ..Default::default()
        };
        let out = extract_value(&l, CellIndex::new(0, 0), &config).unwrap();
        assert_eq!(out.value, Some(7.8));
    }

    #[test]
    fn test_missing_band_is_raster_access_error() {
        let config = QueryConfig {
            band: 3,
            ..Default::default()
        };
        let err = extract_value(&layer(), CellIndex::new(0, 0), &config).unwrap_err();
        assert!(matches!(err, StackError::RasterAccess { .. }));
    }
}

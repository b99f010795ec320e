//! Raster access seam.
//!
//! The core never opens files itself. Callers hand it already-opened layers
//! through the [`RasterLayer`] trait; [`MemoryLayer`] is an in-memory
//! implementation used by tests and by callers that decode rasters elsewhere.

use crate::error::BoxError;
use crate::types::GeoTransform;

/// Result type returned by raster access collaborators.
pub type ReadResult<T> = std::result::Result<T, BoxError>;

/// A single opened raster layer.
///
/// Bands are numbered from 1. Cell data is addressed by (column, row) with
/// row 0 at the top of the raster.
pub trait RasterLayer: Send + Sync {
    /// Layer identifier, usually the file stem.
    fn name(&self) -> &str;

    /// Affine transform of the layer.
    fn transform(&self) -> GeoTransform;

    /// Number of rows (raster height).
    fn rows(&self) -> usize;

    /// Number of columns (raster width).
    fn columns(&self) -> usize;

    /// Number of bands.
    fn band_count(&self) -> usize;

    /// Declared nodata sentinel, if any.
    fn nodata(&self) -> Option<f64>;

    /// Precomputed (minimum, maximum) from the raster metadata, if present.
    fn stored_min_max(&self, _band: usize) -> Option<(f64, f64)> {
        None
    }

    /// Read a single cell.
    fn read_cell(&self, band: usize, column: usize, row: usize) -> ReadResult<f64>;

    /// Read a full band in row-major order.
    fn read_band(&self, band: usize) -> ReadResult<Vec<f64>>;
}

/// Raster layer held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryLayer {
    name: String,
    transform: GeoTransform,
    rows: usize,
    columns: usize,
    bands: Vec<Vec<f64>>,
    nodata: Option<f64>,
    statistics: Option<(f64, f64)>,
}

impl MemoryLayer {
    /// Create a single-band layer. `data` must hold `rows * columns` values.
    pub fn new(
        name: impl Into<String>,
        transform: GeoTransform,
        rows: usize,
        columns: usize,
        data: Vec<f64>,
    ) -> ReadResult<Self> {
        let name = name.into();
        check_band_len(&name, rows, columns, &data)?;
        Ok(Self {
            name,
            transform,
            rows,
            columns,
            bands: vec![data],
            nodata: None,
            statistics: None,
        })
    }

    /// Create a layer where every cell holds the same value.
    pub fn filled(
        name: impl Into<String>,
        transform: GeoTransform,
        rows: usize,
        columns: usize,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            transform,
            rows,
            columns,
            bands: vec![vec![value; rows * columns]],
            nodata: None,
            statistics: None,
        }
    }

    /// Declare a nodata sentinel.
    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = Some(nodata);
        self
    }

    /// Attach precomputed statistics, as a raster format's metadata would.
    pub fn with_statistics(mut self, minimum: f64, maximum: f64) -> Self {
        self.statistics = Some((minimum, maximum));
        self
    }

    /// Append another band.
    pub fn with_band(mut self, data: Vec<f64>) -> ReadResult<Self> {
        check_band_len(&self.name, self.rows, self.columns, &data)?;
        self.bands.push(data);
        Ok(self)
    }

    /// Overwrite one cell of band 1.
    pub fn set_cell(&mut self, column: usize, row: usize, value: f64) -> ReadResult<()> {
        let idx = self.offset(column, row)?;
        self.bands[0][idx] = value;
        Ok(())
    }

    fn offset(&self, column: usize, row: usize) -> ReadResult<usize> {
        if column >= self.columns || row >= self.rows {
            return Err(format!(
                "cell ({}, {}) is outside {}x{} raster {}",
                column, row, self.columns, self.rows, self.name
            )
            .into());
        }
        Ok(row * self.columns + column)
    }

    fn band(&self, band: usize) -> ReadResult<&[f64]> {
        band.checked_sub(1)
            .and_then(|i| self.bands.get(i))
            .map(Vec::as_slice)
            .ok_or_else(|| format!("raster {} has no band {}", self.name, band).into())
    }
}

fn check_band_len(name: &str, rows: usize, columns: usize, data: &[f64]) -> ReadResult<()> {
    if data.len() != rows * columns {
        return Err(format!(
            "raster {} expects {} values ({} rows x {} cols), got {}",
            name,
            rows * columns,
            rows,
            columns,
            data.len()
        )
        .into());
    }
    Ok(())
}

impl RasterLayer for MemoryLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self) -> GeoTransform {
        self.transform
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    fn stored_min_max(&self, _band: usize) -> Option<(f64, f64)> {
        self.statistics
    }

    fn read_cell(&self, band: usize, column: usize, row: usize) -> ReadResult<f64> {
        let idx = self.offset(column, row)?;
        Ok(self.band(band)?[idx])
    }

    fn read_band(&self, band: usize) -> ReadResult<Vec<f64>> {
        Ok(self.band(band)?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform() -> GeoTransform {
        GeoTransform::new(0.0, 30.0, 10.0, -10.0)
    }

    #[test]
    fn test_memory_layer_read_cell() {
        let data: Vec<f64> = (0..9).map(f64::from).collect();
        let layer = MemoryLayer::new("lsd", transform(), 3, 3, data).unwrap();

        assert_eq!(layer.read_cell(1, 0, 0).unwrap(), 0.0);
        assert_eq!(layer.read_cell(1, 2, 1).unwrap(), 5.0);
        assert_eq!(layer.read_cell(1, 2, 2).unwrap(), 8.0);
        assert!(layer.read_cell(1, 3, 0).is_err());
        assert!(layer.read_cell(2, 0, 0).is_err());
        assert!(layer.read_cell(0, 0, 0).is_err());
    }

    #[test]
    fn test_memory_layer_rejects_wrong_length() {
        assert!(MemoryLayer::new("bad", transform(), 3, 3, vec![0.0; 8]).is_err());
    }

    #[test]
    fn test_memory_layer_bands() {
        let layer = MemoryLayer::filled("multi", transform(), 2, 2, 1.0)
            .with_band(vec![2.0; 4])
            .unwrap();
        assert_eq!(layer.band_count(), 2);
        assert_eq!(layer.read_cell(2, 1, 1).unwrap(), 2.0);
        assert_eq!(layer.read_band(1).unwrap(), vec![1.0; 4]);
    }

    #[test]
    fn test_set_cell() {
        let mut layer = MemoryLayer::filled("dtw", transform(), 3, 3, 5.0).with_nodata(-9999.0);
        layer.set_cell(1, 2, -9999.0).unwrap();
        assert_eq!(layer.read_cell(1, 1, 2).unwrap(), -9999.0);
        assert_eq!(layer.nodata(), Some(-9999.0));
    }
}

//! Error types for GeoTIFF access.

use thiserror::Error;

/// Result type for GeoTIFF operations.
pub type GeoTiffResult<T> = Result<T, GeoTiffError>;

/// Error types for GeoTIFF access.
#[derive(Error, Debug)]
pub enum GeoTiffError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoder error from the TIFF layer
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// No usable georeferencing tags
    #[error("Missing georeference: {0}")]
    MissingGeoreference(String),

    /// Valid TIFF the reader cannot interpret as a raster grid
    #[error("Unsupported layout: {0}")]
    Unsupported(String),

    /// Requested band does not exist
    #[error("Band {band} out of range (raster has {count} bands)")]
    InvalidBand { band: usize, count: usize },

    /// Requested cell does not exist
    #[error("Cell ({column}, {row}) outside {columns}x{rows} raster")]
    CellOutOfRange {
        column: usize,
        row: usize,
        columns: usize,
        rows: usize,
    },
}

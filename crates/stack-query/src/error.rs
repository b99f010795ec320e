//! Error types for stack queries.

use std::fmt;

use thiserror::Error;

use crate::types::{Coordinate, Extent};

/// Boxed error produced by a raster access collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Grid property compared by the consistency checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridField {
    Columns,
    Rows,
    OriginX,
    OriginY,
    CellWidth,
    CellHeight,
}

impl fmt::Display for GridField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Columns => write!(f, "cols"),
            Self::Rows => write!(f, "rows"),
            Self::OriginX => write!(f, "X origin"),
            Self::OriginY => write!(f, "Y origin"),
            Self::CellWidth => write!(f, "cell width"),
            Self::CellHeight => write!(f, "cell height"),
        }
    }
}

/// Errors that terminate a stack query.
#[derive(Error, Debug)]
pub enum StackError {
    /// The query coordinate lies outside the raster footprint.
    #[error(
        "coordinate ({x}, {y}) is outside of raster (x range {min_x} to {max_x}, y range {min_y} to {max_y})"
    )]
    OutOfBounds {
        x: f64,
        y: f64,
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    },

    /// A layer disagrees with the reference geometry of the stack.
    #[error("raster {layer} has {field} {actual} to differ from {expected}")]
    LayerMismatch {
        layer: String,
        field: GridField,
        expected: String,
        actual: String,
    },

    /// Every layer resolved to nodata at the query cell.
    #[error("site is outside the extent of the geologic units")]
    NoCoverage,

    /// The raster collaborator could not read a layer.
    #[error("error reading raster {layer}: {source}")]
    RasterAccess {
        layer: String,
        #[source]
        source: BoxError,
    },

    /// The reference layer has a degenerate grid.
    #[error("invalid grid geometry: {0}")]
    InvalidGeometry(String),

    /// No layers were supplied.
    #[error("no raster layers provided")]
    EmptyStack,
}

impl StackError {
    /// Create an OutOfBounds error for a coordinate and the footprint it missed.
    pub fn out_of_bounds(coordinate: Coordinate, extent: Extent) -> Self {
        Self::OutOfBounds {
            x: coordinate.x,
            y: coordinate.y,
            min_x: extent.min_x,
            max_x: extent.max_x,
            min_y: extent.min_y,
            max_y: extent.max_y,
        }
    }

    /// Create a LayerMismatch error.
    pub fn layer_mismatch(
        layer: impl Into<String>,
        field: GridField,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self::LayerMismatch {
            layer: layer.into(),
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a RasterAccess error.
    pub fn raster_access(layer: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::RasterAccess {
            layer: layer.into(),
            source: source.into(),
        }
    }

    /// Short machine-readable name, used for metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::LayerMismatch { .. } => "layer_mismatch",
            Self::NoCoverage => "no_coverage",
            Self::RasterAccess { .. } => "raster_access",
            Self::InvalidGeometry(_) => "invalid_geometry",
            Self::EmptyStack => "empty_stack",
        }
    }
}

/// Result type for stack query operations.
pub type Result<T> = std::result::Result<T, StackError>;

//! JSON response bodies.

use serde::{Deserialize, Serialize};
use stack_query::{IntervalSpec, LayerResult, StackResult};

use crate::request::LocationRequest;

/// Field names of each entry in `rasters`, in order.
pub const RASTER_FIELDS: [&str; 5] = ["raster", "value", "maximum", "minimum", "nodata"];

/// Outcome marker carried by every body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failed,
}

/// One corner of the cell polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellCorner {
    pub x: f64,
    pub y: f64,
}

/// Per-raster entry of a location response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterEntry {
    pub raster: String,
    pub value: Option<f64>,
    pub maximum: Option<f64>,
    pub minimum: Option<f64>,
    pub nodata: Option<f64>,
}

impl From<&LayerResult> for RasterEntry {
    fn from(layer: &LayerResult) -> Self {
        Self {
            raster: layer.name.clone(),
            value: layer.value,
            maximum: layer.maximum,
            minimum: layer.minimum,
            nodata: layer.nodata,
        }
    }
}

/// Successful location response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub status: Status,
    pub nrows: usize,
    pub ncols: usize,
    pub nlays: usize,
    pub longitude: f64,
    pub latitude: f64,
    pub easting: f64,
    pub northing: f64,
    pub row: i64,
    pub column: i64,
    pub cell_width: f64,
    /// Cell polygon: upper-left, upper-right, lower-right, lower-left.
    pub cell: Vec<CellCorner>,
    pub raster_fields: Vec<String>,
    pub rasters: Vec<RasterEntry>,
    /// Number of rasters with a value at the cell.
    pub cell_count: usize,
}

impl LocationResponse {
    /// Format a stack result for the request that produced it.
    pub fn new(request: &LocationRequest, result: &StackResult) -> Self {
        Self {
            status: Status::Success,
            nrows: result.grid.rows,
            ncols: result.grid.columns,
            nlays: result.layer_count(),
            longitude: request.longitude,
            latitude: request.latitude,
            easting: result.coordinate.x,
            northing: result.coordinate.y,
            row: result.cell.row,
            column: result.cell.column,
            cell_width: result.grid.cell_size.width,
            cell: result
                .bounds
                .corners()
                .iter()
                .map(|c| CellCorner { x: c.x, y: c.y })
                .collect(),
            raster_fields: RASTER_FIELDS.iter().map(|f| f.to_string()).collect(),
            rasters: result.layers.iter().map(RasterEntry::from).collect(),
            cell_count: result.valid_cell_count,
        }
    }
}

/// Failure body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub status: Status,
    pub message: String,
}

impl FailureResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            message: message.into(),
        }
    }
}

/// Nice interval for a value range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalResponse {
    pub status: Status,
    pub min: f64,
    pub max: f64,
    pub interval: f64,
    /// Class boundaries from `min` to `max`.
    pub breaks: Vec<f64>,
}

impl From<IntervalSpec> for IntervalResponse {
    fn from(spec: IntervalSpec) -> Self {
        Self {
            status: Status::Success,
            min: spec.min,
            max: spec.max,
            interval: spec.interval,
            breaks: spec.breaks(),
        }
    }
}

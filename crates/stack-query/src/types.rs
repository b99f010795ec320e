//! Core types for stack queries.

use serde::{Deserialize, Serialize};

/// A world coordinate in the rasters' projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Affine transform between pixel (column, row) and world coordinates.
///
/// Rotation terms are not supported; north-up rasters have a negative
/// `cell_height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl GeoTransform {
    /// Create a new transform.
    pub fn new(origin_x: f64, origin_y: f64, cell_width: f64, cell_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_width,
            cell_height,
        }
    }

    /// Build from a GDAL-style six element geotransform.
    pub fn from_gdal(gt: [f64; 6]) -> Self {
        Self::new(gt[0], gt[3], gt[1], gt[5])
    }

    /// World coordinate of a (possibly fractional) pixel position.
    pub fn apply(&self, column: f64, row: f64) -> Coordinate {
        Coordinate::new(
            self.origin_x + column * self.cell_width,
            self.origin_y + row * self.cell_height,
        )
    }

    /// Upper-left corner of the raster.
    pub fn origin(&self) -> GridOrigin {
        GridOrigin::new(self.origin_x, self.origin_y)
    }

    /// Cell size of the raster.
    pub fn cell_size(&self) -> CellSize {
        CellSize::new(self.cell_width, self.cell_height)
    }
}

/// Upper-left corner shared by every layer of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridOrigin {
    pub x: f64,
    pub y: f64,
}

impl GridOrigin {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin rounded to a fixed number of decimal places.
    pub fn rounded(&self, decimals: u32) -> Self {
        Self::new(round_to(self.x, decimals), round_to(self.y, decimals))
    }
}

/// Cell dimensions in world units. `height` is negative for north-up grids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned footprint of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    /// Check if a coordinate lies within the extent, edges included.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x >= self.min_x
            && coordinate.x <= self.max_x
            && coordinate.y >= self.min_y
            && coordinate.y <= self.max_y
    }
}

/// Grid cell address. Signed so that callers can probe outside a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: i64,
    pub column: i64,
}

impl CellIndex {
    pub fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }
}

/// Cell polygon, corners in the order upper-left, upper-right, lower-right,
/// lower-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub upper_left: Coordinate,
    pub upper_right: Coordinate,
    pub lower_right: Coordinate,
    pub lower_left: Coordinate,
}

impl CellBounds {
    /// Corners in polygon order.
    pub fn corners(&self) -> [Coordinate; 4] {
        [
            self.upper_left,
            self.upper_right,
            self.lower_right,
            self.lower_left,
        ]
    }

    /// Axis-aligned extent covered by the cell.
    pub fn extent(&self) -> Extent {
        let corners = self.corners();
        let mut extent = Extent {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for c in corners {
            extent.min_x = extent.min_x.min(c.x);
            extent.max_x = extent.max_x.max(c.x);
            extent.min_y = extent.min_y.min(c.y);
            extent.max_y = extent.max_y.max(c.y);
        }
        extent
    }

    /// Check if a coordinate lies within the cell, edges included.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.extent().contains(coordinate)
    }
}

/// Reference geometry established by the first layer of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridReference {
    pub origin: GridOrigin,
    pub cell_size: CellSize,
    pub rows: usize,
    pub columns: usize,
}

impl GridReference {
    /// Footprint spanned by the two opposite corners of the grid.
    pub fn extent(&self) -> Extent {
        let far_x = self.origin.x + self.columns as f64 * self.cell_size.width;
        let far_y = self.origin.y + self.rows as f64 * self.cell_size.height;
        Extent {
            min_x: self.origin.x.min(far_x),
            max_x: self.origin.x.max(far_x),
            min_y: self.origin.y.min(far_y),
            max_y: self.origin.y.max(far_y),
        }
    }

    /// Affine transform of the reference grid.
    pub fn transform(&self) -> GeoTransform {
        GeoTransform::new(
            self.origin.x,
            self.origin.y,
            self.cell_size.width,
            self.cell_size.height,
        )
    }
}

/// Per-layer outcome of a stack query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerResult {
    pub name: String,
    pub value: Option<f64>,
    pub maximum: Option<f64>,
    pub minimum: Option<f64>,
    pub nodata: Option<f64>,
}

impl LayerResult {
    /// Whether the layer has data at the query cell.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// Outcome of a full stack query, ready for a response formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackResult {
    /// Geometry shared by every layer.
    pub grid: GridReference,
    /// Query coordinate.
    pub coordinate: Coordinate,
    /// Cell containing the coordinate.
    pub cell: CellIndex,
    /// Polygon of that cell.
    pub bounds: CellBounds,
    /// One entry per layer, in input order.
    pub layers: Vec<LayerResult>,
    /// Number of layers with a value at the cell.
    pub valid_cell_count: usize,
}

impl StackResult {
    /// Number of layers in the stack.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Find a layer result by name.
    pub fn layer(&self, name: &str) -> Option<&LayerResult> {
        self.layers.iter().find(|l| l.name == name)
    }
}

/// Round to a fixed number of decimal places.
///
/// Values too large to scale are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

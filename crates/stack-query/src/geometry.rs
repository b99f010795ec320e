//! Coordinate to cell resolution.

use tracing::debug;

use crate::error::{Result, StackError};
use crate::types::{CellBounds, CellIndex, Coordinate, GridReference};

/// Find the cell containing `coordinate`.
///
/// The coordinate must lie inside the closed footprint of the grid. Points on
/// the far right or bottom edge belong to the last column or row.
pub fn resolve_cell(coordinate: Coordinate, grid: &GridReference) -> Result<CellIndex> {
    let extent = grid.extent();
    if !extent.contains(coordinate) {
        return Err(StackError::out_of_bounds(coordinate, extent));
    }

    // Offsets are non-negative inside the footprint, so floor == truncation.
    let row = ((grid.origin.y - coordinate.y).abs() / grid.cell_size.height.abs()).floor() as i64;
    let column = ((grid.origin.x - coordinate.x).abs() / grid.cell_size.width.abs()).floor() as i64;

    let index = CellIndex::new(
        row.min(grid.rows as i64 - 1),
        column.min(grid.columns as i64 - 1),
    );
    debug!(row = index.row, column = index.column, "Resolved cell");
    Ok(index)
}

/// Polygon of a cell: upper-left, upper-right, lower-right, lower-left.
pub fn cell_bounds(index: CellIndex, grid: &GridReference) -> CellBounds {
    let transform = grid.transform();
    let col = index.column as f64;
    let row = index.row as f64;

    CellBounds {
        upper_left: transform.apply(col, row),
        upper_right: transform.apply(col + 1.0, row),
        lower_right: transform.apply(col + 1.0, row + 1.0),
        lower_left: transform.apply(col, row + 1.0),
    }
}

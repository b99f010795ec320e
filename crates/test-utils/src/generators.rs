//! Grid data generators for stack tests.
//!
//! Each generator returns a row-major `Vec<f64>` of `columns * rows` values
//! shaped like one layer of a subsurface stack. The values are synthetic but
//! keep the ordering real stacks have: land surface above water table above
//! aquifer base.

/// Land surface elevation in metres.
///
/// Rises from 150 m in the south-west to about 210 m in the north-east.
pub fn create_surface_grid(columns: usize, rows: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for col in 0..columns {
            let east = col as f64 / columns.max(1) as f64;
            let north = 1.0 - row as f64 / rows.max(1) as f64;
            data.push(150.0 + east * 30.0 + north * 30.0);
        }
    }
    data
}

/// Depth to water in metres, deepest at the grid centre.
pub fn create_depth_grid(columns: usize, rows: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(columns * rows);
    let center_x = columns as f64 / 2.0;
    let center_y = rows as f64 / 2.0;
    let max_dist = (center_x * center_x + center_y * center_y).sqrt().max(1.0);

    for row in 0..rows {
        for col in 0..columns {
            let dx = col as f64 - center_x;
            let dy = row as f64 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();
            data.push(5.0 + (1.0 - dist / max_dist) * 20.0);
        }
    }
    data
}

/// Water table elevation: surface minus depth, cell by cell.
pub fn create_water_table_grid(columns: usize, rows: usize) -> Vec<f64> {
    create_surface_grid(columns, rows)
        .into_iter()
        .zip(create_depth_grid(columns, rows))
        .map(|(surface, depth)| surface - depth)
        .collect()
}

/// Uncertainty fraction in `[0, 1]`, increasing from west to east.
pub fn create_uncertainty_grid(columns: usize, rows: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(columns * rows);
    for _row in 0..rows {
        for col in 0..columns {
            data.push(col as f64 / columns.saturating_sub(1).max(1) as f64);
        }
    }
    data
}

/// A grid with every cell set to `value`.
pub fn create_constant_grid(columns: usize, rows: usize, value: f64) -> Vec<f64> {
    vec![value; columns * rows]
}

/// A grid whose value encodes its position: `row * 100 + col`.
///
/// Handy for checking that a query read the cell it was supposed to.
pub fn create_index_grid(columns: usize, rows: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for col in 0..columns {
            data.push((row * 100 + col) as f64);
        }
    }
    data
}

/// Overwrite the given `(column, row)` cells with `nodata`.
pub fn with_nodata_cells(
    mut data: Vec<f64>,
    columns: usize,
    cells: &[(usize, usize)],
    nodata: f64,
) -> Vec<f64> {
    for &(col, row) in cells {
        if let Some(slot) = data.get_mut(row * columns + col) {
            *slot = nodata;
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_have_expected_length() {
        assert_eq!(create_surface_grid(10, 8).len(), 80);
        assert_eq!(create_depth_grid(10, 8).len(), 80);
        assert_eq!(create_water_table_grid(10, 8).len(), 80);
        assert_eq!(create_uncertainty_grid(10, 8).len(), 80);
        assert_eq!(create_constant_grid(10, 8, 1.0).len(), 80);
        assert_eq!(create_index_grid(10, 8).len(), 80);
    }

    #[test]
    fn test_water_table_below_surface() {
        let surface = create_surface_grid(6, 6);
        let water = create_water_table_grid(6, 6);
        assert!(surface.iter().zip(&water).all(|(s, w)| w < s));
    }

    #[test]
    fn test_uncertainty_range() {
        let grid = create_uncertainty_grid(5, 3);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[4], 1.0);
        assert!(grid.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_index_grid_encodes_position() {
        let grid = create_index_grid(10, 10);
        assert_eq!(grid[2 * 10 + 3], 203.0);
    }

    #[test]
    fn test_with_nodata_cells() {
        let grid = with_nodata_cells(create_constant_grid(3, 3, 1.0), 3, &[(1, 2), (9, 9)], -9999.0);
        assert_eq!(grid[7], -9999.0);
        assert_eq!(grid.iter().filter(|v| **v == -9999.0).count(), 1);
    }
}

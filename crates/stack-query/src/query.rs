//! Stack query orchestration.

use tracing::{debug, info_span, warn};

use crate::config::QueryConfig;
use crate::consistency::check_consistency;
use crate::error::{Result, StackError};
use crate::extract::extract_value;
use crate::geometry::{cell_bounds, resolve_cell};
use crate::layer::RasterLayer;
use crate::stats::resolve_statistics;
use crate::types::{Coordinate, LayerResult, StackResult};

/// Runs point queries against an ordered stack of layers.
///
/// Layers are expected in land-surface-to-bedrock order; the order is kept in
/// the result but not enforced.
#[derive(Debug, Clone, Default)]
pub struct StackQuery {
    config: QueryConfig,
}

impl StackQuery {
    /// Create a query runner with the given configuration.
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Configuration used by this runner.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Query every layer at `coordinate`.
    ///
    /// # Errors
    /// - [`StackError::EmptyStack`] / [`StackError::InvalidGeometry`] for an
    ///   unusable reference layer
    /// - [`StackError::LayerMismatch`] on the first layer that disagrees with
    ///   the reference grid
    /// - [`StackError::OutOfBounds`] when the coordinate is outside the grid
    /// - [`StackError::RasterAccess`] when a layer cannot be read
    /// - [`StackError::NoCoverage`] when no layer has data at the cell
    pub fn run(
        &self,
        layers: &[Box<dyn RasterLayer>],
        coordinate: Coordinate,
    ) -> Result<StackResult> {
        let span = info_span!("stack_query", x = coordinate.x, y = coordinate.y, layers = layers.len());
        let _guard = span.enter();

        let grid = check_consistency(layers, self.config.origin_precision)?;
        let cell = resolve_cell(coordinate, &grid)?;
        let bounds = cell_bounds(cell, &grid);

        let mut results = Vec::with_capacity(layers.len());
        let mut valid_cell_count = 0;

        for layer in layers {
            let layer = layer.as_ref();
            let extracted = extract_value(layer, cell, &self.config)?;
            let stats = resolve_statistics(layer, &self.config)?;

            if extracted.value.is_some() {
                valid_cell_count += 1;
            }

            debug!(
                layer = layer.name(),
                value = ?extracted.value,
                "Processed raster"
            );

            results.push(LayerResult {
                name: layer.name().to_string(),
                value: extracted.value,
                maximum: stats.maximum,
                minimum: stats.minimum,
                nodata: stats.nodata,
            });
        }

        if valid_cell_count == 0 {
            warn!(row = cell.row, column = cell.column, "No layer has data at cell");
            return Err(StackError::NoCoverage);
        }

        Ok(StackResult {
            grid,
            coordinate,
            cell,
            bounds,
            layers: results,
            valid_cell_count,
        })
    }
}

/// Query a stack with an explicit configuration.
pub fn query_stack(
    layers: &[Box<dyn RasterLayer>],
    coordinate: Coordinate,
    config: &QueryConfig,
) -> Result<StackResult> {
    StackQuery::new(config.clone()).run(layers, coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::MemoryLayer;
    use crate::types::{CellIndex, GeoTransform};

    fn transform() -> GeoTransform {
        GeoTransform::new(0.0, 100.0, 10.0, -10.0)
    }

    fn stack(values: [f64; 3]) -> Vec<Box<dyn RasterLayer>> {
        ["lsd", "dtw", "wtele"]
            .iter()
            .zip(values)
            .map(|(name, v)| {
                Box::new(MemoryLayer::filled(*name, transform(), 10, 10, v).with_nodata(-9999.0))
                    as Box<dyn RasterLayer>
            })
            .collect()
    }

    #[test]
    fn test_run_counts_valid_cells() {
        let layers = stack([120.5, -9999.0, 80.25]);
        let result = StackQuery::default()
            .run(&layers, Coordinate::new(25.0, 75.0))
            .unwrap();

        assert_eq!(result.cell, CellIndex::new(2, 2));
        assert_eq!(result.valid_cell_count, 2);
        assert_eq!(result.layers.len(), 3);
        assert_eq!(result.layers[0].value, Some(120.5));
        assert_eq!(result.layers[1].value, None);
        assert_eq!(result.layers[1].nodata, Some(-9999.0));
        assert_eq!(result.layers[1].minimum, None);
        assert_eq!(result.layers[2].value, Some(80.25));
    }

    #[test]
    fn test_run_all_nodata_is_no_coverage() {
        let layers = stack([-9999.0; 3]);
        let err = StackQuery::default()
            .run(&layers, Coordinate::new(25.0, 75.0))
            .unwrap_err();
        assert!(matches!(err, StackError::NoCoverage));
    }

    #[test]
    fn test_run_out_of_bounds() {
        let layers = stack([1.0, 2.0, 3.0]);
        let err = query_stack(&layers, Coordinate::new(250.0, 75.0), &QueryConfig::default())
            .unwrap_err();
        assert!(matches!(err, StackError::OutOfBounds { .. }));
    }

    #[test]
    fn test_mismatch_checked_before_bounds() {
        let mut layers = stack([1.0, 2.0, 3.0]);
        layers.push(Box::new(MemoryLayer::filled("uncer", transform(), 10, 11, 0.2)));
        let err = query_stack(&layers, Coordinate::new(250.0, 75.0), &QueryConfig::default())
            .unwrap_err();
        assert!(matches!(err, StackError::LayerMismatch { .. }));
    }
}

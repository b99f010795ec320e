//! Cross-layer geometry checks.

use tracing::{debug, warn};

use crate::error::{GridField, Result, StackError};
use crate::layer::RasterLayer;
use crate::types::{round_to, GridReference};

/// Verify that every layer shares the grid of the first layer.
///
/// The first layer establishes the reference origin (rounded to
/// `precision` decimals), cell size, row count and column count. Each later
/// layer is compared field by field and the first mismatch is returned.
pub fn check_consistency(
    layers: &[Box<dyn RasterLayer>],
    precision: u32,
) -> Result<GridReference> {
    let (first, rest) = layers.split_first().ok_or(StackError::EmptyStack)?;

    let reference = reference_grid(first.as_ref(), precision)?;
    debug!(
        layer = first.name(),
        origin_x = reference.origin.x,
        origin_y = reference.origin.y,
        rows = reference.rows,
        columns = reference.columns,
        "Reference grid"
    );

    for layer in rest {
        if let Err(e) = compare(layer.as_ref(), &reference, precision) {
            warn!(layer = layer.name(), error = %e, "Layer does not match reference grid");
            return Err(e);
        }
    }

    Ok(reference)
}

/// Capture the reference geometry from a single layer.
pub fn reference_grid(layer: &dyn RasterLayer, precision: u32) -> Result<GridReference> {
    let transform = layer.transform();
    let cell_size = transform.cell_size();

    if layer.rows() == 0 || layer.columns() == 0 {
        return Err(StackError::InvalidGeometry(format!(
            "raster {} has {} rows and {} cols",
            layer.name(),
            layer.rows(),
            layer.columns()
        )));
    }
    if !cell_size.width.is_finite()
        || !cell_size.height.is_finite()
        || cell_size.width == 0.0
        || cell_size.height == 0.0
    {
        return Err(StackError::InvalidGeometry(format!(
            "raster {} has cell size {} x {}",
            layer.name(),
            cell_size.width,
            cell_size.height
        )));
    }

    Ok(GridReference {
        origin: transform.origin().rounded(precision),
        cell_size,
        rows: layer.rows(),
        columns: layer.columns(),
    })
}

fn compare(layer: &dyn RasterLayer, reference: &GridReference, precision: u32) -> Result<()> {
    let name = layer.name();

    if layer.columns() != reference.columns {
        return Err(StackError::layer_mismatch(
            name,
            GridField::Columns,
            reference.columns,
            layer.columns(),
        ));
    }

    if layer.rows() != reference.rows {
        return Err(StackError::layer_mismatch(
            name,
            GridField::Rows,
            reference.rows,
            layer.rows(),
        ));
    }

    let transform = layer.transform();
    let p = precision as usize;
    let checks = [
        (GridField::OriginX, reference.origin.x, transform.origin_x),
        (GridField::OriginY, reference.origin.y, transform.origin_y),
        (GridField::CellWidth, reference.cell_size.width, transform.cell_width),
        (GridField::CellHeight, reference.cell_size.height, transform.cell_height),
    ];

    for (field, expected, actual) in checks {
        let expected = round_to(expected, precision);
        let actual = round_to(actual, precision);
        if expected != actual {
            return Err(StackError::layer_mismatch(
                name,
                field,
                format!("{:.*}", p, expected),
                format!("{:.*}", p, actual),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::MemoryLayer;
    use crate::types::GeoTransform;

    fn layer(name: &str, transform: GeoTransform, rows: usize, cols: usize) -> Box<dyn RasterLayer> {
        Box::new(MemoryLayer::filled(name, transform, rows, cols, 1.0))
    }

    fn base() -> GeoTransform {
        GeoTransform::new(517_461.5932, 5_046_855.8012, 30.0, -30.0)
    }

    #[test]
    fn test_identical_layers_pass() {
        let layers: Vec<_> = ["lsd", "dtw", "wtele", "uncer"]
            .iter()
            .map(|n| layer(n, base(), 10, 12))
            .collect();
        let reference = check_consistency(&layers, 3).unwrap();
        assert_eq!(reference.rows, 10);
        assert_eq!(reference.columns, 12);
        assert_eq!(reference.origin.x, 517_461.593);
        assert_eq!(reference.origin.y, 5_046_855.801);
    }

    #[test]
    fn test_empty_stack() {
        let layers: Vec<Box<dyn RasterLayer>> = Vec::new();
        assert!(matches!(
            check_consistency(&layers, 3),
            Err(StackError::EmptyStack)
        ));
    }

    #[test]
    fn test_column_mismatch_names_layer() {
        let layers = vec![
            layer("lsd", base(), 10, 12),
            layer("dtw", base(), 10, 12),
            layer("wtele", base(), 10, 13),
            layer("uncer", base(), 10, 14),
        ];
        match check_consistency(&layers, 3) {
            Err(StackError::LayerMismatch {
                layer,
                field,
                expected,
                actual,
            }) => {
                assert_eq!(layer, "wtele");
                assert_eq!(field, GridField::Columns);
                assert_eq!(expected, "12");
                assert_eq!(actual, "13");
            }
            other => panic!("expected LayerMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_columns_checked_before_rows() {
        let layers = vec![layer("lsd", base(), 10, 12), layer("dtw", base(), 11, 13)];
        match check_consistency(&layers, 3) {
            Err(StackError::LayerMismatch { field, .. }) => assert_eq!(field, GridField::Columns),
            other => panic!("expected LayerMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_origin_drift_below_precision_is_tolerated() {
        let mut drifted = base();
        drifted.origin_x += 0.0001;
        drifted.origin_y -= 0.0002;
        let layers = vec![layer("lsd", base(), 10, 12), layer("dtw", drifted, 10, 12)];
        assert!(check_consistency(&layers, 3).is_ok());
    }

    #[test]
    fn test_origin_y_mismatch() {
        let mut shifted = base();
        shifted.origin_y += 30.0;
        let layers = vec![layer("lsd", base(), 10, 12), layer("dtw", shifted, 10, 12)];
        match check_consistency(&layers, 3) {
            Err(StackError::LayerMismatch {
                layer,
                field,
                expected,
                actual,
            }) => {
                assert_eq!(layer, "dtw");
                assert_eq!(field, GridField::OriginY);
                assert_eq!(expected, "5046855.801");
                assert_eq!(actual, "5046885.801");
            }
            other => panic!("expected LayerMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_cell_size_mismatch() {
        let coarse = GeoTransform::new(base().origin_x, base().origin_y, 60.0, -60.0);
        let layers = vec![layer("lsd", base(), 10, 12), layer("dtw", coarse, 10, 12)];
        match check_consistency(&layers, 3) {
            Err(StackError::LayerMismatch { field, .. }) => {
                assert_eq!(field, GridField::CellWidth)
            }
            other => panic!("expected LayerMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_reference_rejected() {
        let flat = GeoTransform::new(0.0, 0.0, 0.0, -10.0);
        let layers = vec![layer("lsd", flat, 10, 12)];
        assert!(matches!(
            check_consistency(&layers, 3),
            Err(StackError::InvalidGeometry(_))
        ));
    }
}

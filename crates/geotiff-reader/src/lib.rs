//! GeoTIFF raster access for stack queries.
//!
//! Opens GeoTIFF files as [`stack_query::RasterLayer`]s:
//!
//! - Georeferencing from `ModelPixelScale` + `ModelTiepoint` or
//!   `ModelTransformation` (axis-aligned only)
//! - Nodata sentinel from the `GDAL_NODATA` tag
//! - Stored band statistics from `GDAL_METADATA`
//! - Any sample type the `tiff` crate decodes, widened to `f64`
//!
//! # Example
//!
//! ```ignore
//! use geotiff_reader::open_layers;
//! use stack_query::{Coordinate, StackQuery};
//!
//! let layers = open_layers(&["lsd.tif", "dtw.tif", "wtele.tif"])?;
//! let result = StackQuery::default().run(&layers, Coordinate::new(x, y))?;
//! ```

pub mod error;
pub mod georef;
pub mod metadata;
pub mod reader;

use std::path::Path;

use stack_query::{RasterLayer, StackError};

pub use error::{GeoTiffError, GeoTiffResult};
pub use georef::GeoTags;
pub use reader::{layer_name, GeoTiffLayer};

/// Open every path as a layer, in order.
///
/// Failures are reported as [`StackError::RasterAccess`] naming the layer.
pub fn open_layers<P: AsRef<Path>>(paths: &[P]) -> stack_query::Result<Vec<Box<dyn RasterLayer>>> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            GeoTiffLayer::open(path)
                .map(|layer| Box::new(layer) as Box<dyn RasterLayer>)
                .map_err(|e| StackError::raster_access(layer_name(path), e))
        })
        .collect()
}

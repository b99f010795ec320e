//! Point Queries Against Subsurface Raster Stacks
//!
//! This crate answers "what is under this point?" for an ordered stack of
//! co-registered rasters (land surface, depth to water, water-table
//! elevation, aquifer surfaces ...). It provides:
//!
//! - **Grid resolution**: world coordinate to containing cell and cell polygon
//! - **Consistency checks**: every layer must share the first layer's grid
//! - **Nodata handling**: declared sentinel plus the float32-minimum sentinel
//! - **Nice intervals**: human-friendly legend breaks for a value range
//!
//! Raster decoding lives outside this crate; layers arrive through the
//! [`RasterLayer`] trait.
//!
//! # Architecture
//!
//! ```text
//! StackQuery::run(layers, coordinate)
//!      │
//!      ├─► check_consistency(layers)     first layer is the reference grid
//!      │
//!      ├─► resolve_cell(coordinate)      one CellIndex for the whole stack
//!      ├─► cell_bounds(cell)
//!      │
//!      ├─► for each layer
//!      │      ├─► extract_value(layer, cell)
//!      │      └─► resolve_statistics(layer)
//!      │
//!      └─► StackResult (or NoCoverage when every layer is nodata)
//! ```
//!
//! # Example
//!
//! ```
//! use stack_query::{Coordinate, GeoTransform, MemoryLayer, RasterLayer, StackQuery};
//!
//! let transform = GeoTransform::new(0.0, 100.0, 10.0, -10.0);
//! let layers: Vec<Box<dyn RasterLayer>> = vec![
//!     Box::new(MemoryLayer::filled("lsd", transform, 10, 10, 152.4)),
//!     Box::new(MemoryLayer::filled("dtw", transform, 10, 10, 12.0)),
//! ];
//!
//! let result = StackQuery::default()
//!     .run(&layers, Coordinate::new(25.0, 75.0))
//!     .unwrap();
//! assert_eq!(result.cell.row, 2);
//! assert_eq!(result.cell.column, 2);
//! assert_eq!(result.valid_cell_count, 2);
//! ```

pub mod config;
pub mod consistency;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod interval;
pub mod layer;
pub mod query;
pub mod stats;
pub mod types;

// Re-export commonly used types at crate root
pub use config::QueryConfig;
pub use consistency::check_consistency;
pub use error::{BoxError, GridField, Result, StackError};
pub use extract::{extract_value, ExtractedValue, DEFAULT_NODATA, FLOAT32_MIN_SENTINEL};
pub use geometry::{cell_bounds, resolve_cell};
pub use interval::{select_interval, IntervalSpec};
pub use layer::{MemoryLayer, RasterLayer, ReadResult};
pub use query::{query_stack, StackQuery};
pub use stats::{resolve_statistics, LayerStatistics};
pub use types::{
    CellBounds, CellIndex, CellSize, Coordinate, Extent, GeoTransform, GridOrigin,
    GridReference, LayerResult, StackResult,
};

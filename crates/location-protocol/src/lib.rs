//! Request parsing and JSON responses for raster stack location queries.
//!
//! Shared by the HTTP service and the command-line tool so both accept the
//! same parameters and print the same bodies.

pub mod error;
pub mod request;
pub mod response;

pub use error::{LocationError, ProtocolError, RASTERS_REQUIRED};
pub use request::{
    is_real_number, parse_number, split_rasters, IntervalParams, LocationParams,
    LocationRequest, RasterSource,
};
pub use response::{
    CellCorner, FailureResponse, IntervalResponse, LocationResponse, RasterEntry, Status,
    RASTER_FIELDS,
};

//! Request errors and the mapping of every failure to a status code and
//! failure body.

use stack_query::StackError;
use thiserror::Error;

use crate::response::FailureResponse;

/// Message used whenever the raster list is missing or empty.
pub const RASTERS_REQUIRED: &str =
    "Provide a set of rasters from land surface to bedrock (descending order)";

/// Errors raised while validating a location request.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// A required parameter is absent or blank.
    #[error("{}", missing_message(.0))]
    MissingParameter(&'static str),

    /// A numeric parameter failed validation.
    #[error("Provide a numeric value for {0}")]
    InvalidNumber(String),

    /// The raster list is present but names nothing.
    #[error("{}", RASTERS_REQUIRED)]
    NoRasters,

    /// A raster path escapes the data directory or is otherwise unusable.
    #[error("Error: Raster file {0} is not a valid path")]
    InvalidRasterPath(String),

    /// A raster path does not exist.
    #[error("Error: Raster file {0} does not exist")]
    RasterNotFound(String),

    /// A named stack is not configured.
    #[error("Unknown stack {0}")]
    UnknownStack(String),
}

fn missing_message(name: &str) -> String {
    match name {
        "rasters" => RASTERS_REQUIRED.to_string(),
        other => format!("Provide a numeric {other} value"),
    }
}

impl ProtocolError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ProtocolError::MissingParameter(_) => 400,
            ProtocolError::InvalidNumber(_) => 400,
            ProtocolError::NoRasters => 400,
            ProtocolError::InvalidRasterPath(_) => 400,
            ProtocolError::RasterNotFound(_) => 404,
            ProtocolError::UnknownStack(_) => 404,
        }
    }

    /// Short machine-readable name, used for metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ProtocolError::MissingParameter(_) => "missing_parameter",
            ProtocolError::InvalidNumber(_) => "invalid_number",
            ProtocolError::NoRasters => "no_rasters",
            ProtocolError::InvalidRasterPath(_) => "invalid_raster_path",
            ProtocolError::RasterNotFound(_) => "raster_not_found",
            ProtocolError::UnknownStack(_) => "unknown_stack",
        }
    }
}

/// Any failure of a location request.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Stack(#[from] StackError),
}

impl LocationError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            LocationError::Protocol(e) => e.status_code(),
            LocationError::Stack(e) => match e {
                StackError::OutOfBounds { .. } => 400,
                StackError::EmptyStack => 400,
                StackError::LayerMismatch { .. } => 422,
                StackError::InvalidGeometry(_) => 422,
                StackError::NoCoverage => 404,
                StackError::RasterAccess { .. } => 500,
            },
        }
    }

    /// Short machine-readable name, used for metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            LocationError::Protocol(e) => e.kind(),
            LocationError::Stack(e) => e.kind(),
        }
    }

    /// Convert to the failure body.
    pub fn to_failure(&self) -> FailureResponse {
        let message = match self {
            LocationError::Stack(StackError::RasterAccess { layer, .. }) => {
                format!("Error: Opening and reading raster {layer}")
            }
            LocationError::Stack(StackError::NoCoverage) => {
                "Site is outside the extent of the geologic units".to_string()
            }
            other => other.to_string(),
        };
        FailureResponse::new(message)
    }
}

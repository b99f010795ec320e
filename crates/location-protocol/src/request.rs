//! Query parameter parsing for location requests.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use stack_query::Coordinate;

use crate::error::ProtocolError;

/// Real numbers accepted for coordinates: optional sign, optional integer
/// part, optional fraction, optional exponent.
const REAL_NUMBER_PATTERN: &str = r"^[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?$";

/// Raster list separators.
const RASTER_SEPARATOR_PATTERN: &str = r"[;,\s]+";

fn real_number() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(REAL_NUMBER_PATTERN).ok()).as_ref()
}

fn raster_separator() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(RASTER_SEPARATOR_PATTERN).ok())
        .as_ref()
}

/// Raw query string parameters of a location request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationParams {
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    pub x_coordinate: Option<String>,
    pub y_coordinate: Option<String>,
    /// Raster files from land surface down to bedrock.
    pub rasters: Option<String>,
    /// Name of a configured stack, used instead of `rasters`.
    pub stack: Option<String>,
}

/// Where the layers of a request come from.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterSource {
    /// Explicit raster files, in stack order.
    Files(Vec<String>),
    /// A named stack from configuration.
    Stack(String),
}

/// A validated location request.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRequest {
    /// Geographic position, echoed in the response.
    pub longitude: f64,
    pub latitude: f64,
    /// Position in the rasters' projection, used for the query.
    pub x_coordinate: f64,
    pub y_coordinate: f64,
    pub source: RasterSource,
}

impl LocationRequest {
    /// Query coordinate in raster space.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x_coordinate, self.y_coordinate)
    }
}

impl LocationParams {
    /// Validate the raw parameters.
    ///
    /// Missing parameters are reported one at a time, rasters first, then
    /// longitude, latitude, x_coordinate and y_coordinate.
    pub fn validate(&self) -> Result<LocationRequest, ProtocolError> {
        let stack = present(&self.stack);
        let rasters = present(&self.rasters);

        if stack.is_none() && rasters.is_none() {
            return Err(ProtocolError::MissingParameter("rasters"));
        }
        let longitude = require(&self.longitude, "longitude")?;
        let latitude = require(&self.latitude, "latitude")?;
        let x_coordinate = require(&self.x_coordinate, "x_coordinate")?;
        let y_coordinate = require(&self.y_coordinate, "y_coordinate")?;

        let source = match (stack, rasters) {
            (Some(name), _) => RasterSource::Stack(name.to_string()),
            (None, Some(list)) => {
                let files = split_rasters(list);
                if files.is_empty() {
                    return Err(ProtocolError::NoRasters);
                }
                RasterSource::Files(files)
            }
            (None, None) => return Err(ProtocolError::MissingParameter("rasters")),
        };

        Ok(LocationRequest {
            longitude: parse_number("longitude", longitude)?,
            latitude: parse_number("latitude", latitude)?,
            x_coordinate: parse_number("x_coordinate", x_coordinate)?,
            y_coordinate: parse_number("y_coordinate", y_coordinate)?,
            source,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn require<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, ProtocolError> {
    present(value).ok_or(ProtocolError::MissingParameter(name))
}

/// Whether `value` is a plain real number.
pub fn is_real_number(value: &str) -> bool {
    real_number().is_some_and(|re| re.is_match(value))
}

/// Parse a numeric parameter, rejecting anything that is not a plain finite
/// real number.
pub fn parse_number(name: &str, value: &str) -> Result<f64, ProtocolError> {
    let value = value.trim();
    if !is_real_number(value) {
        return Err(ProtocolError::InvalidNumber(name.to_string()));
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ProtocolError::InvalidNumber(name.to_string()))
}

/// Split a raster list on `;`, `,` or whitespace, dropping empty entries.
pub fn split_rasters(list: &str) -> Vec<String> {
    match raster_separator() {
        Some(re) => re
            .split(list)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => list
            .split(|c: char| c == ';' || c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Query parameters of an interval request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntervalParams {
    pub min: Option<String>,
    pub max: Option<String>,
}

impl IntervalParams {
    /// Validate into `(min, max)`.
    pub fn validate(&self) -> Result<(f64, f64), ProtocolError> {
        let min = require(&self.min, "min")?;
        let max = require(&self.max, "max")?;
        Ok((parse_number("min", min)?, parse_number("max", max)?))
    }
}

//! Command implementations behind the `location-cli` binary.
//!
//! Each command returns the body the binary prints, so the same JSON the
//! HTTP service answers with can be produced offline against local files.

use std::path::Path;

use anyhow::{Context, Result};
use legend::{ColorRamp, ColorSpecification, Legend};
use location_protocol::{
    IntervalParams, IntervalResponse, LocationError, LocationParams, LocationResponse,
    ProtocolError, RasterSource,
};
use serde::Serialize;
use stack_query::{select_interval, QueryConfig, StackQuery};

/// Run a stack query against raster files given on the command line.
///
/// Raster paths are used as given; there is no data directory.
pub fn location(
    params: &LocationParams,
    config: &QueryConfig,
) -> Result<LocationResponse, LocationError> {
    let request = params.validate()?;

    let files = match &request.source {
        RasterSource::Files(files) => files,
        RasterSource::Stack(name) => return Err(ProtocolError::UnknownStack(name.clone()).into()),
    };

    let layers = geotiff_reader::open_layers(files)?;
    let result = StackQuery::new(config.clone()).run(&layers, request.coordinate())?;

    tracing::debug!(
        row = result.cell.row,
        column = result.cell.column,
        valid = result.valid_cell_count,
        "Location query answered"
    );

    Ok(LocationResponse::new(&request, &result))
}

/// Nice interval and breaks for a value range.
pub fn interval(params: &IntervalParams) -> Result<IntervalResponse, LocationError> {
    let (min, max) = params.validate()?;
    Ok(IntervalResponse::from(select_interval(min, max)))
}

/// Build a legend.
///
/// With a colour file the legend has one class per entry, limited to
/// `range` when given. Without one, `range` is required and the classes
/// follow the water-level ramp.
pub fn legend(color_file: Option<&Path>, range: Option<(f64, f64)>) -> Result<Legend> {
    match (color_file, range) {
        (Some(path), range) => {
            let spec = ColorSpecification::from_file(path)
                .with_context(|| format!("Failed to read colour file: {:?}", path))?;
            let mut legend = Legend::from_specification(&spec)?;
            if let Some((min, max)) = range {
                legend.classes.retain(|c| c.lower >= min && c.lower <= max);
            }
            Ok(legend)
        }
        (None, Some((min, max))) => Ok(Legend::for_range(min, max, &ColorRamp::water_level())),
        (None, None) => anyhow::bail!("Provide a colour file or a --min/--max range"),
    }
}

/// Serialize a body for stdout.
pub fn to_json<T: Serialize>(body: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(body)?
    } else {
        serde_json::to_string(body)?
    };
    Ok(json)
}

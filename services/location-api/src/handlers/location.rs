//! Location query handler.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::Response,
};
use location_protocol::{
    LocationError, LocationParams, LocationRequest, LocationResponse, ProtocolError, RasterSource,
};
use stack_query::{StackQuery, StackResult};
use tracing::{debug, error, warn};

use super::{failure_response, internal_error, json_response};
use crate::metrics::record_query;
use crate::paths::resolve_rasters;
use crate::state::AppState;

/// GET /location?longitude=&latitude=&x_coordinate=&y_coordinate=&rasters=
///
/// `stack=<name>` may replace `rasters`.
pub async fn location_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> Response {
    let started = Instant::now();

    let outcome = match prepare(&state, &params) {
        Ok((request, paths)) => {
            let config = state.query_config.clone();
            let coordinate = request.coordinate();
            let task = tokio::task::spawn_blocking(move || -> Result<StackResult, LocationError> {
                let layers = geotiff_reader::open_layers(&paths)?;
                Ok(StackQuery::new(config).run(&layers, coordinate)?)
            });

            match task.await {
                Ok(result) => result.map(|result| LocationResponse::new(&request, &result)),
                Err(e) => {
                    error!("Stack query task failed: {}", e);
                    record_query(started.elapsed(), Some("task_failed"));
                    return internal_error("Error: Stack query did not complete");
                }
            }
        }
        Err(e) => Err(e),
    };

    record_query(started.elapsed(), outcome.as_ref().err().map(|e| e.kind()));

    match outcome {
        Ok(response) => {
            debug!(
                row = response.row,
                column = response.column,
                cell_count = response.cell_count,
                "Location query answered"
            );
            json_response(StatusCode::OK, &response)
        }
        Err(e) => {
            warn!(kind = e.kind(), "Location query failed: {}", e);
            failure_response(&e)
        }
    }
}

/// Validate parameters and resolve the raster files of the request.
fn prepare(
    state: &AppState,
    params: &LocationParams,
) -> Result<(LocationRequest, Vec<PathBuf>), LocationError> {
    let request = params.validate()?;

    let rasters = match &request.source {
        RasterSource::Files(files) => files.clone(),
        RasterSource::Stack(name) => state
            .stacks
            .get(name)
            .map(|stack| stack.rasters.clone())
            .ok_or_else(|| ProtocolError::UnknownStack(name.clone()))?,
    };

    let paths = resolve_rasters(&state.data_dir, &rasters)?;
    Ok((request, paths))
}

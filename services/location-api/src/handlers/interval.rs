//! Nice interval handler.

use axum::{extract::Query, http::StatusCode, response::Response};
use location_protocol::{IntervalParams, IntervalResponse, LocationError};
use stack_query::select_interval;

use super::{failure_response, json_response};

/// GET /interval?min=&max=
pub async fn interval_handler(Query(params): Query<IntervalParams>) -> Response {
    match params.validate() {
        Ok((min, max)) => {
            let spec = select_interval(min, max);
            tracing::debug!(min, max, interval = spec.interval, "Selected interval");
            json_response(StatusCode::OK, &IntervalResponse::from(spec))
        }
        Err(e) => failure_response(&LocationError::from(e)),
    }
}

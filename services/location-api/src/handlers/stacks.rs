//! Configured stack listing.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
};
use location_protocol::{LocationError, ProtocolError};
use serde::{Deserialize, Serialize};

use super::{failure_response, json_response};
use crate::config::StackDefinition;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rasters: Vec<String>,
}

impl StackSummary {
    fn new(name: &str, definition: &StackDefinition) -> Self {
        Self {
            name: name.to_string(),
            description: definition.description.clone(),
            rasters: definition.rasters.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StacksResponse {
    pub stacks: Vec<StackSummary>,
}

/// GET /stacks
pub async fn list_stacks_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let stacks = state
        .stacks
        .stacks
        .iter()
        .map(|(name, definition)| StackSummary::new(name, definition))
        .collect();

    json_response(StatusCode::OK, &StacksResponse { stacks })
}

/// GET /stacks/:name
pub async fn get_stack_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    match state.stacks.get(&name) {
        Some(definition) => json_response(StatusCode::OK, &StackSummary::new(&name, definition)),
        None => failure_response(&LocationError::from(ProtocolError::UnknownStack(name))),
    }
}

//! Application state for the location API.

use std::path::PathBuf;

use stack_query::QueryConfig;

use crate::config::StacksConfig;

/// Shared application state. Read-only after start-up.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directory every raster path is resolved against.
    pub data_dir: PathBuf,

    /// Settings handed to each stack query.
    pub query_config: QueryConfig,

    /// Stacks selectable with `stack=<name>`.
    pub stacks: StacksConfig,
}

impl AppState {
    pub fn new(data_dir: impl Into<PathBuf>, query_config: QueryConfig, stacks: StacksConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            query_config,
            stacks,
        }
    }
}

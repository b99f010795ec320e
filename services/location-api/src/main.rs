//! Location API Server
//!
//! Answers "what is under this point?" for stacks of subsurface rasters.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use stack_query::QueryConfig;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use location_api::config::StacksConfig;
use location_api::state::AppState;

/// Location API Server
#[derive(Parser, Debug)]
#[command(name = "location-api")]
#[command(about = "Point queries against subsurface raster stacks")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8085", env = "LOCATION_LISTEN_ADDR")]
    listen: String,

    /// Directory raster paths are resolved against
    #[arg(long, default_value = "./data", env = "LOCATION_DATA_DIR")]
    data_dir: PathBuf,

    /// YAML file of named stacks
    #[arg(long, default_value = "./config/stacks.yaml", env = "LOCATION_STACKS_FILE")]
    stacks_file: PathBuf,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "LOCATION_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting location API server");

    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let query_config = QueryConfig::from_env();
    query_config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid query configuration: {e}"))?;

    let stacks = StacksConfig::load_from_file(&args.stacks_file)?;

    if !args.data_dir.is_dir() {
        tracing::warn!("Data directory {:?} does not exist", args.data_dir);
    }

    let state = Arc::new(AppState::new(args.data_dir, query_config, stacks));
    let app = location_api::app(state, Some(prometheus_handle));

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Location API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}

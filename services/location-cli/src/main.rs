//! Location CLI
//!
//! Offline point queries against GeoTIFF stacks. Bodies go to stdout as
//! JSON; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use location_protocol::{IntervalParams, LocationParams};
use stack_query::QueryConfig;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "location-cli")]
#[command(about = "Point queries, intervals and legends for subsurface raster stacks", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, global = true, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query every raster of a stack at one location
    Location {
        /// Longitude, echoed in the response
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<String>,

        /// Latitude, echoed in the response
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<String>,

        /// Easting in the rasters' projection
        #[arg(long, allow_hyphen_values = true)]
        x_coordinate: Option<String>,

        /// Northing in the rasters' projection
        #[arg(long, allow_hyphen_values = true)]
        y_coordinate: Option<String>,

        /// Raster files from land surface to bedrock
        #[arg(long, num_args = 1..)]
        rasters: Vec<String>,
    },

    /// Pick a nice class interval for a value range
    Interval {
        #[arg(long, allow_hyphen_values = true)]
        min: String,

        #[arg(long, allow_hyphen_values = true)]
        max: String,
    },

    /// Print legend classes
    Legend {
        /// Colour specification file
        #[arg(long)]
        color_file: Option<PathBuf>,

        #[arg(long, allow_hyphen_values = true, requires = "max")]
        min: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires = "min")]
        max: Option<f64>,
    },
}

fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Location {
            longitude,
            latitude,
            x_coordinate,
            y_coordinate,
            rasters,
        } => {
            let params = LocationParams {
                longitude,
                latitude,
                x_coordinate,
                y_coordinate,
                rasters: (!rasters.is_empty()).then(|| rasters.join(";")),
                stack: None,
            };

            let config = QueryConfig::from_env();
            config
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid query configuration: {e}"))?;

            match location_cli::location(&params, &config) {
                Ok(response) => {
                    println!("{}", location_cli::to_json(&response, cli.pretty)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    tracing::warn!(kind = e.kind(), "Location query failed: {}", e);
                    println!("{}", location_cli::to_json(&e.to_failure(), cli.pretty)?);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Interval { min, max } => {
            let params = IntervalParams {
                min: Some(min),
                max: Some(max),
            };
            match location_cli::interval(&params) {
                Ok(response) => {
                    println!("{}", location_cli::to_json(&response, cli.pretty)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    println!("{}", location_cli::to_json(&e.to_failure(), cli.pretty)?);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Legend {
            color_file,
            min,
            max,
        } => {
            let range = min.zip(max);
            let legend = location_cli::legend(color_file.as_deref(), range)?;
            println!("{}", location_cli::to_json(&legend, cli.pretty)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

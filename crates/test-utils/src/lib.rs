//! Shared test utilities for the raster stack workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Grid data generators shaped like stack layers
//! - A GeoTIFF writer and temp-directory stack fixture
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{grid, GeoTiffOptions, StackDir};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

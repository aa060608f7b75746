#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Single-page reconstruction report rendering.
//!
//! A render is one synchronous pass: normalize the boundary for the map
//! section, draw a fresh random building table, and format the page. The
//! [`ReportConfig`] is passed in explicitly; nothing is cached between
//! renders.

pub mod config;
pub mod html;
pub mod map;
pub mod sample;
pub mod tiles;

use std::path::{Path, PathBuf};

use khalidiya_report_models::ReportConfig;
use thiserror::Error;

/// Errors that can occur while loading configuration or preparing the map.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Reading a file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// TOML parsing failed.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but is not usable.
    #[error("Invalid config: {message}")]
    InvalidConfig {
        /// Description of what went wrong.
        message: String,
    },

    /// Boundary normalization failed.
    #[error(transparent)]
    Boundary(#[from] khalidiya_boundary::BoundaryError),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders the complete report page.
///
/// Boundary failures are shown inside the map section; this function
/// itself never fails. `base_dir` anchors the configured boundary path.
#[must_use]
pub fn render_report(config: &ReportConfig, base_dir: &Path) -> String {
    let map = map::build_map_section(config, base_dir);
    let buildings = sample::generate_buildings(&config.buildings, &mut rand::rng());

    log::debug!("Rendering report with {} building rows", buildings.len());

    html::render_page(config, &map, &buildings)
}

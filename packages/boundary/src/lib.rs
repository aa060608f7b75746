#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary loading and normalization for the reconstruction report map.
//!
//! Reads a `GeoJSON` boundary file, reprojects it to EPSG:4326, turns an
//! open boundary line into a closed polygon, repairs invalid geometry, and
//! computes the point the map is centered on. Only the first feature of a
//! file is used; any further features are ignored.

pub mod crs;
pub mod export;
pub mod load;
pub mod normalize;
pub mod reproject;

use std::path::{Path, PathBuf};

use khalidiya_boundary_models::NormalizedBoundary;
use thiserror::Error;

pub use export::boundary_to_geojson;
pub use load::{load_records, parse_records};
pub use normalize::{close_ring, normalize_geometry, normalize_records};
pub use reproject::reproject_to_wgs84;

/// Errors that can occur while loading or normalizing a boundary.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// The boundary file does not exist.
    #[error("Boundary file not found: {}", path.display())]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The boundary file exists but could not be read.
    #[error("Failed to read boundary file {}: {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The source is not a usable `GeoJSON` document.
    #[error("Format error: {message}")]
    Format {
        /// Description of what went wrong.
        message: String,
    },

    /// The dataset contains no features with geometry.
    #[error("Boundary dataset contains no features")]
    EmptyDataset,

    /// The declared coordinate reference system is not supported.
    #[error("Unsupported coordinate reference system: {name}")]
    UnsupportedCrs {
        /// CRS name as declared in the file.
        name: String,
    },

    /// Building or running the coordinate transform failed.
    #[error("Projection error: {message}")]
    Projection {
        /// Description of what went wrong.
        message: String,
    },

    /// A reprojected coordinate fell outside valid longitude/latitude.
    #[error("Reprojected coordinate ({lon}, {lat}) is outside the valid lon/lat range")]
    OutOfRange {
        /// Longitude in degrees.
        lon: f64,
        /// Latitude in degrees.
        lat: f64,
    },

    /// The first feature is not a polygon, multipolygon, or line.
    #[error("Unsupported boundary geometry: {kind}")]
    UnsupportedGeometry {
        /// Geometry type name.
        kind: &'static str,
    },

    /// Validity repair could not produce a usable boundary.
    #[error("Geometry repair failed: {message}")]
    Repair {
        /// Description of what went wrong.
        message: String,
    },
}

/// Loads the boundary file at `path` and normalizes its first feature.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the file is missing or unparsable, holds
/// no features, cannot be reprojected, or cannot be repaired.
pub fn normalize_file(path: &Path) -> Result<NormalizedBoundary, BoundaryError> {
    log::debug!("Loading boundary from {}", path.display());

    let records = load_records(path)?;
    let normalized = normalize_records(records)?;

    log::info!(
        "Normalized boundary from {}: {} polygon(s), center ({:.6}, {:.6})",
        path.display(),
        normalized.boundary.0.len(),
        normalized.center.lat,
        normalized.center.lon,
    );

    Ok(normalized)
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the reconstruction report server.
//!
//! These types are serialized to JSON. They are kept apart from the
//! boundary and report types so the API contract can evolve on its own.

use khalidiya_boundary_models::LatLon;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// The normalized boundary as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBoundary {
    /// Map center.
    pub center: LatLon,
    /// Whether repair collapsed the boundary to an empty polygon.
    pub empty: bool,
    /// Boundary as a `GeoJSON` feature.
    pub feature: serde_json::Value,
}

/// Error body for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}

//! `GeoJSON` output of a normalized boundary for the map overlay.

use geojson::{Feature, Geometry, JsonObject, Value};
use khalidiya_boundary_models::NormalizedBoundary;

/// Converts a boundary into a `GeoJSON` feature.
///
/// The center point is attached as `centerLat`/`centerLon` properties so
/// the map surface can focus on it without recomputing anything.
#[must_use]
pub fn boundary_to_geojson(normalized: &NormalizedBoundary) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("centerLat".to_string(), normalized.center.lat.into());
    properties.insert("centerLon".to_string(), normalized.center.lon.into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&normalized.boundary))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

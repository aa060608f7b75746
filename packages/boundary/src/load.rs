//! Reads `GeoJSON` boundary sources into [`GeometryRecord`] values.
//!
//! Accepts a `FeatureCollection`, a single `Feature`, or a bare
//! `Geometry`. The legacy top-level `crs` member is honored; files without
//! one are EPSG:4326 as RFC 7946 requires.

use std::io::ErrorKind;
use std::path::Path;

use geojson::{GeoJson, JsonObject};
use khalidiya_boundary_models::{Crs, GeometryRecord};

use crate::BoundaryError;

/// Reads every feature geometry from the file at `path`.
///
/// The file is read fully and closed before parsing starts.
///
/// # Errors
///
/// Returns [`BoundaryError::FileNotFound`] if `path` does not exist,
/// [`BoundaryError::Io`] if it cannot be read, or any error from
/// [`parse_records`].
pub fn load_records(path: &Path) -> Result<Vec<GeometryRecord>, BoundaryError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => BoundaryError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => BoundaryError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_records(&text)
}

/// Parses a `GeoJSON` document into geometry records.
///
/// Features with a `null` geometry are skipped. The returned records keep
/// the document's feature order.
///
/// # Errors
///
/// Returns [`BoundaryError::Format`] if the text is not `GeoJSON` or a
/// geometry cannot be converted, and [`BoundaryError::UnsupportedCrs`] if
/// the `crs` member names a system that cannot be parsed.
pub fn parse_records(text: &str) -> Result<Vec<GeometryRecord>, BoundaryError> {
    let geojson = text.parse::<GeoJson>().map_err(|e| BoundaryError::Format {
        message: format!("Failed to parse GeoJSON: {e}"),
    })?;

    let (crs, geometries) = match geojson {
        GeoJson::FeatureCollection(collection) => (
            declared_crs(collection.foreign_members.as_ref())?,
            collection
                .features
                .into_iter()
                .map(|feature| feature.geometry)
                .collect::<Vec<_>>(),
        ),
        GeoJson::Feature(feature) => (
            declared_crs(feature.foreign_members.as_ref())?,
            vec![feature.geometry],
        ),
        GeoJson::Geometry(geometry) => (
            declared_crs(geometry.foreign_members.as_ref())?,
            vec![Some(geometry)],
        ),
    };

    let total = geometries.len();
    let records = geometries
        .into_iter()
        .flatten()
        .map(|geometry| {
            let geometry: geo::Geometry<f64> =
                geometry.try_into().map_err(|e| BoundaryError::Format {
                    message: format!("Failed to convert GeoJSON geometry: {e}"),
                })?;
            Ok(GeometryRecord {
                geometry,
                crs: crs.clone(),
            })
        })
        .collect::<Result<Vec<_>, BoundaryError>>()?;

    if records.len() < total {
        log::debug!(
            "Skipped {} feature(s) without geometry",
            total - records.len()
        );
    }
    log::debug!("Parsed {} boundary record(s) in {crs}", records.len());

    Ok(records)
}

/// Extracts the CRS from a legacy `crs` member, defaulting to EPSG:4326.
fn declared_crs(members: Option<&JsonObject>) -> Result<Crs, BoundaryError> {
    let Some(crs) = members.and_then(|m| m.get("crs")) else {
        return Ok(Crs::wgs84());
    };
    if crs.is_null() {
        return Ok(Crs::wgs84());
    }

    let name = crs
        .get("properties")
        .and_then(|props| props.get("name"))
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| BoundaryError::Format {
            message: format!("Unrecognized crs member: {crs}"),
        })?;

    Crs::parse(name).ok_or_else(|| BoundaryError::UnsupportedCrs {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_keeps_feature_order_and_skips_null_geometry() {
        let records = parse_records(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{},"geometry":null},
                {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[0,0],[1,0],[1,1]]}},
                {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[5,5]}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert!(matches!(records[0].geometry, geo::Geometry::LineString(_)));
        assert!(matches!(records[1].geometry, geo::Geometry::Point(_)));
        assert!(records.iter().all(|r| r.crs == Crs::wgs84()));
    }

    #[test]
    fn bare_geometry_is_a_single_record() {
        let records =
            parse_records(r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#)
                .unwrap();
        assert_eq!(records.len(), 1);
        assert!(matches!(records[0].geometry, geo::Geometry::Polygon(_)));
    }

    #[test]
    fn reads_named_crs_member() {
        let records = parse_records(
            r#"{"type":"FeatureCollection",
                "crs":{"type":"name","properties":{"name":"EPSG:32637"}},
                "features":[{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[500000,3840000]}}]}"#,
        )
        .unwrap();
        assert_eq!(records[0].crs, Crs::Epsg(32637));
    }

    #[test]
    fn unknown_crs_is_rejected() {
        let err = parse_records(
            r#"{"type":"FeatureCollection",
                "crs":{"type":"name","properties":{"name":"ESRI:102003"}},
                "features":[]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, BoundaryError::UnsupportedCrs { ref name } if name == "ESRI:102003"));
    }

    #[test]
    fn linked_crs_is_a_format_error() {
        let err = parse_records(
            r#"{"type":"FeatureCollection",
                "crs":{"type":"link","properties":{"href":"http://example.com/crs"}},
                "features":[]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, BoundaryError::Format { .. }));
    }

    #[test]
    fn empty_collection_parses_to_no_records() {
        let records = parse_records(r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(records.is_empty());
    }
}

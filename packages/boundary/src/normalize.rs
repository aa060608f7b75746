//! Turns a reprojected boundary geometry into a [`NormalizedBoundary`].
//!
//! Open lines are closed into rings, invalid polygons are repaired with a
//! zero-width self-union, and the centroid of the result becomes the map
//! center.

use geo::{
    Area as _, BooleanOps as _, Centroid as _, Coord, Geometry, LineString, MultiPolygon, Polygon,
    Validation as _,
};
use khalidiya_boundary_models::{GeometryRecord, NormalizedBoundary};

use crate::{BoundaryError, reproject_to_wgs84};

/// Appends a copy of the first coordinate when the sequence is open.
///
/// Empty and already closed sequences are returned unchanged.
#[must_use]
pub fn close_ring(mut coords: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
    if let (Some(first), Some(last)) = (coords.first().copied(), coords.last().copied()) {
        if first != last {
            coords.push(first);
        }
    }
    coords
}

/// Reprojects every record and normalizes the first one.
///
/// Additional records are ignored.
///
/// # Errors
///
/// Returns [`BoundaryError::EmptyDataset`] if `records` is empty, or any
/// error from reprojection or [`normalize_geometry`].
pub fn normalize_records(records: Vec<GeometryRecord>) -> Result<NormalizedBoundary, BoundaryError> {
    let geometries = records
        .iter()
        .map(reproject_to_wgs84)
        .collect::<Result<Vec<_>, _>>()?;

    if geometries.len() > 1 {
        log::debug!(
            "Using the first of {} boundary features; the rest are ignored",
            geometries.len()
        );
    }

    let first = geometries
        .into_iter()
        .next()
        .ok_or(BoundaryError::EmptyDataset)?;

    normalize_geometry(first)
}

/// Closes, repairs, and centers a single EPSG:4326 geometry.
///
/// A valid polygon with positive area is kept as-is. Any zero-area input
/// (the ring `[(0,0), (1,1), (0,0)]`, or a collinear line of any length)
/// repairs to an empty multipolygon; its center is then taken from the
/// unrepaired ring.
///
/// # Errors
///
/// Returns [`BoundaryError::UnsupportedGeometry`] for points, multi-lines
/// and collections, and [`BoundaryError::Repair`] if the geometry has no
/// coordinates or repair still leaves it invalid.
pub fn normalize_geometry(geometry: Geometry<f64>) -> Result<NormalizedBoundary, BoundaryError> {
    let shape = to_polygonal(geometry)?;

    let boundary = if shape.is_valid() && shape.unsigned_area() > 0.0 {
        shape.clone()
    } else {
        log::debug!("Boundary is invalid or has zero area, repairing");
        let repaired = shape.union(&MultiPolygon::<f64>::new(Vec::new()));
        if repaired.unsigned_area() <= 0.0 {
            log::warn!("Boundary has zero area; repair produced an empty polygon");
            MultiPolygon::new(Vec::new())
        } else if repaired.is_valid() {
            repaired
        } else {
            return Err(BoundaryError::Repair {
                message: "repaired boundary is still invalid".to_string(),
            });
        }
    };

    let center = boundary
        .centroid()
        .or_else(|| shape.centroid())
        .ok_or_else(|| BoundaryError::Repair {
            message: "boundary has no centroid".to_string(),
        })?;

    Ok(NormalizedBoundary {
        boundary,
        center: center.into(),
    })
}

/// Converts the supported geometry kinds into a multipolygon.
fn to_polygonal(geometry: Geometry<f64>) -> Result<MultiPolygon<f64>, BoundaryError> {
    let ring = match geometry {
        Geometry::Polygon(polygon) => return Ok(MultiPolygon::new(vec![polygon])),
        Geometry::MultiPolygon(multi) => return Ok(multi),
        Geometry::LineString(line) => line.0,
        Geometry::Line(line) => vec![line.start, line.end],
        other => {
            return Err(BoundaryError::UnsupportedGeometry {
                kind: geometry_kind(&other),
            });
        }
    };

    if ring.is_empty() {
        return Err(BoundaryError::Repair {
            message: "boundary line has no coordinates".to_string(),
        });
    }

    let ring = close_ring(ring);
    Ok(MultiPolygon::new(vec![Polygon::new(
        LineString::new(ring),
        Vec::new(),
    )]))
}

const fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

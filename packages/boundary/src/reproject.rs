//! Reprojects boundary geometry into EPSG:4326 longitude/latitude.

use geo::{Coord, Geometry, MapCoords as _};
use khalidiya_boundary_models::{Crs, GeometryRecord};
use proj4rs::{proj::Proj, transform::transform};

use crate::BoundaryError;
use crate::crs::{WGS84_PROJ4, is_geographic, is_web_mercator, proj4_definition};

/// Web Mercator sphere radius in meters.
const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Distance in degrees within which an output is treated as on the limit.
const SNAP_EPSILON: f64 = 1e-9;

/// Coordinate transform from a source CRS into WGS84 degrees.
enum Reprojector {
    Identity,
    WebMercator,
    Proj {
        from: Proj,
        to: Proj,
        /// `proj4rs` expects geographic input in radians.
        source_is_geographic: bool,
    },
}

impl Reprojector {
    fn for_crs(crs: &Crs) -> Result<Self, BoundaryError> {
        if crs.is_wgs84() {
            return Ok(Self::Identity);
        }
        if is_web_mercator(crs) {
            return Ok(Self::WebMercator);
        }

        let definition = proj4_definition(crs)?;
        let from = Proj::from_proj_string(&definition).map_err(|e| BoundaryError::Projection {
            message: format!("Failed to build source PROJ.4 '{definition}': {e}"),
        })?;
        let to = Proj::from_proj_string(WGS84_PROJ4).map_err(|e| BoundaryError::Projection {
            message: format!("Failed to build target PROJ.4 '{WGS84_PROJ4}': {e}"),
        })?;

        Ok(Self::Proj {
            from,
            to,
            source_is_geographic: is_geographic(&definition),
        })
    }

    fn transform(&self, coord: Coord<f64>) -> Result<Coord<f64>, BoundaryError> {
        let out = match self {
            Self::Identity => coord,
            Self::WebMercator => Coord {
                x: (coord.x / WEB_MERCATOR_RADIUS).to_degrees(),
                y: (coord.y / WEB_MERCATOR_RADIUS).sinh().atan().to_degrees(),
            },
            Self::Proj {
                from,
                to,
                source_is_geographic,
            } => {
                let mut point = if *source_is_geographic {
                    (coord.x.to_radians(), coord.y.to_radians(), 0.0)
                } else {
                    (coord.x, coord.y, 0.0)
                };
                transform(from, to, &mut point).map_err(|e| BoundaryError::Projection {
                    message: format!("Failed to transform ({}, {}): {e}", coord.x, coord.y),
                })?;
                Coord {
                    x: point.0.to_degrees(),
                    y: point.1.to_degrees(),
                }
            }
        };

        let out = Coord {
            x: snap_to_limit(out.x, 180.0),
            y: snap_to_limit(out.y, 90.0),
        };

        if !out.x.is_finite()
            || !out.y.is_finite()
            || !(-180.0..=180.0).contains(&out.x)
            || !(-90.0..=90.0).contains(&out.y)
        {
            return Err(BoundaryError::OutOfRange {
                lon: out.x,
                lat: out.y,
            });
        }

        Ok(out)
    }
}

/// Rounding can push a coordinate on the edge of the projection just past
/// the lon/lat limit; values within `SNAP_EPSILON` of it are pinned to it.
fn snap_to_limit(value: f64, limit: f64) -> f64 {
    if (value.abs() - limit).abs() < SNAP_EPSILON {
        limit.copysign(value)
    } else {
        value
    }
}

/// Returns the record's geometry expressed in EPSG:4326.
///
/// # Errors
///
/// Returns [`BoundaryError::UnsupportedCrs`] or
/// [`BoundaryError::Projection`] if the transform cannot be built or run,
/// and [`BoundaryError::OutOfRange`] if any output coordinate is not a
/// valid longitude/latitude.
pub fn reproject_to_wgs84(record: &GeometryRecord) -> Result<Geometry<f64>, BoundaryError> {
    let reprojector = Reprojector::for_crs(&record.crs)?;
    record
        .geometry
        .try_map_coords(|coord| reprojector.transform(coord))
}

#[cfg(test)]
mod tests {
    use geo::{Coord, LineString, Point};

    use super::*;

    fn record(geometry: impl Into<Geometry<f64>>, crs: Crs) -> GeometryRecord {
        GeometryRecord {
            geometry: geometry.into(),
            crs,
        }
    }

    fn as_point(geometry: Geometry<f64>) -> Point<f64> {
        match geometry {
            Geometry::Point(p) => p,
            other => panic!("expected point, got {other:?}"),
        }
    }

    #[test]
    fn wgs84_is_left_untouched() {
        let line = LineString::from(vec![(36.71, 34.73), (36.72, 34.74)]);
        let out = reproject_to_wgs84(&record(line.clone(), Crs::wgs84())).unwrap();
        assert_eq!(out, Geometry::LineString(line));
    }

    #[test]
    fn wgs84_out_of_range_is_rejected() {
        let err = reproject_to_wgs84(&record(Point::new(200.0, 10.0), Crs::wgs84())).unwrap_err();
        assert!(matches!(err, BoundaryError::OutOfRange { .. }));
    }

    #[test]
    fn web_mercator_origin_and_edge() {
        let origin = as_point(
            reproject_to_wgs84(&record(Point::new(0.0, 0.0), Crs::Epsg(3857))).unwrap(),
        );
        assert!(origin.x().abs() < 1e-12);
        assert!(origin.y().abs() < 1e-12);

        let edge = as_point(
            reproject_to_wgs84(&record(
                Point::new(20_037_508.342_789_244, 20_037_508.342_789_244),
                Crs::Epsg(3857),
            ))
            .unwrap(),
        );
        assert!((edge.x() - 180.0).abs() < 1e-9);
        assert!((edge.y() - 85.051_128_779_806_6).abs() < 1e-6);

        let west = as_point(
            reproject_to_wgs84(&record(
                Point::new(-20_037_508.342_789_244, -20_037_508.342_789_244),
                Crs::Epsg(3857),
            ))
            .unwrap(),
        );
        assert!((-180.0..=180.0).contains(&west.x()), "lon {}", west.x());
        assert!((west.x() + 180.0).abs() < 1e-9);
    }

    #[test]
    fn values_just_past_the_limit_are_pinned() {
        assert_eq!(snap_to_limit(180.000_000_000_000_03, 180.0), 180.0);
        assert_eq!(snap_to_limit(-90.000_000_000_000_01, 90.0), -90.0);
        assert_eq!(snap_to_limit(36.7, 180.0), 36.7);
        assert_eq!(snap_to_limit(180.001, 180.0), 180.001);
    }

    #[test]
    fn utm_zone_37_lands_near_central_meridian() {
        let out = as_point(
            reproject_to_wgs84(&record(
                Point::from(Coord {
                    x: 500_000.0,
                    y: 3_840_000.0,
                }),
                Crs::Epsg(32637),
            ))
            .unwrap(),
        );

        // False easting of 500 km sits on the zone's central meridian (39°E).
        assert!((out.x() - 39.0).abs() < 1e-6, "lon {}", out.x());
        assert!((34.0..35.5).contains(&out.y()), "lat {}", out.y());
    }

    #[test]
    fn unsupported_code_fails_before_transforming() {
        let err =
            reproject_to_wgs84(&record(Point::new(1.0, 1.0), Crs::Epsg(2154))).unwrap_err();
        assert!(matches!(err, BoundaryError::UnsupportedCrs { .. }));
    }
}

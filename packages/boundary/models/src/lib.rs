#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary record and normalized boundary types.
//!
//! A [`GeometryRecord`] is one raw row read from a boundary file together
//! with the coordinate reference system it was declared in. A
//! [`NormalizedBoundary`] is what the normalizer hands to the map: a closed,
//! valid polygon in EPSG:4326 plus the point the map is centered on.

use std::fmt;

use geo::{Geometry, MultiPolygon};
use serde::{Deserialize, Serialize};

/// EPSG code of the longitude/latitude system every boundary is
/// reprojected into.
pub const WGS84_EPSG: u32 = 4326;

/// Coordinate reference system a boundary file declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crs {
    /// A numeric EPSG code (e.g. `3857`).
    Epsg(u32),
    /// OGC `CRS84`: WGS84 with longitude/latitude axis order.
    Crs84,
    /// A raw PROJ.4 definition (`+proj=...`).
    Proj4(String),
}

impl Crs {
    /// The default CRS of `GeoJSON` files without a `crs` member.
    #[must_use]
    pub const fn wgs84() -> Self {
        Self::Epsg(WGS84_EPSG)
    }

    /// Parses a CRS name as it appears in a legacy `GeoJSON` `crs` member.
    ///
    /// Accepts `EPSG:3857`, `urn:ogc:def:crs:EPSG::3857`,
    /// `urn:ogc:def:crs:EPSG:6.6:3857`, `urn:ogc:def:crs:OGC:1.3:CRS84`,
    /// `CRS84`, and raw `+proj=` strings. Returns `None` for anything else.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();

        if name.starts_with("+proj=") {
            return Some(Self::Proj4(name.to_string()));
        }

        let upper = name.to_ascii_uppercase();
        if upper == "CRS84" || upper.ends_with(":CRS84") {
            return Some(Self::Crs84);
        }

        if !upper.contains("EPSG") {
            return None;
        }

        // The code is always the last `:`-separated segment; URN forms may
        // carry an empty or versioned segment before it.
        upper
            .rsplit(':')
            .next()
            .and_then(|code| code.parse::<u32>().ok())
            .map(Self::Epsg)
    }

    /// Whether coordinates in this CRS are already WGS84 lon/lat degrees.
    #[must_use]
    pub const fn is_wgs84(&self) -> bool {
        matches!(self, Self::Crs84 | Self::Epsg(WGS84_EPSG))
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epsg(code) => write!(f, "EPSG:{code}"),
            Self::Crs84 => f.write_str("OGC:CRS84"),
            Self::Proj4(def) => f.write_str(def),
        }
    }
}

/// One geometry row loaded from a boundary source.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    /// Raw geometry in the source CRS.
    pub geometry: Geometry<f64>,
    /// CRS the geometry's coordinates are expressed in.
    pub crs: Crs,
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude in degrees (−90..90).
    pub lat: f64,
    /// Longitude in degrees (−180..180).
    pub lon: f64,
}

impl LatLon {
    /// Creates a point from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both components fall inside the valid degree ranges.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<geo::Point<f64>> for LatLon {
    fn from(point: geo::Point<f64>) -> Self {
        Self {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

/// A boundary ready to be drawn on the map.
///
/// Every ring is closed and the multipolygon passes `geo`'s validity check.
/// A boundary that was already a valid polygon is stored as a one-element
/// multipolygon, unchanged. A zero-area input repairs to an empty
/// multipolygon; `center` is then taken from the unrepaired ring.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBoundary {
    /// Closed, valid boundary in EPSG:4326.
    pub boundary: MultiPolygon<f64>,
    /// Point the map view is centered on.
    pub center: LatLon,
}

impl NormalizedBoundary {
    /// Whether repair collapsed the boundary to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundary.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_epsg_variants() {
        assert_eq!(Crs::parse("EPSG:3857"), Some(Crs::Epsg(3857)));
        assert_eq!(Crs::parse("urn:ogc:def:crs:EPSG::32637"), Some(Crs::Epsg(32637)));
        assert_eq!(Crs::parse("urn:ogc:def:crs:EPSG:6.6:4326"), Some(Crs::Epsg(4326)));
        assert_eq!(Crs::parse("epsg:4269"), Some(Crs::Epsg(4269)));
    }

    #[test]
    fn parses_crs84_and_proj_strings() {
        assert_eq!(Crs::parse("urn:ogc:def:crs:OGC:1.3:CRS84"), Some(Crs::Crs84));
        assert_eq!(
            Crs::parse("+proj=merc +datum=WGS84"),
            Some(Crs::Proj4("+proj=merc +datum=WGS84".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(Crs::parse("ESRI:102003"), None);
        assert_eq!(Crs::parse("EPSG:abc"), None);
        assert_eq!(Crs::parse(""), None);
    }

    #[test]
    fn wgs84_detection() {
        assert!(Crs::wgs84().is_wgs84());
        assert!(Crs::Crs84.is_wgs84());
        assert!(!Crs::Epsg(3857).is_wgs84());
        assert_eq!(Crs::default().to_string(), "EPSG:4326");
    }

    #[test]
    fn lat_lon_range_and_serde() {
        let center = LatLon::from(geo::Point::new(36.7, 34.73));
        assert!((center.lat - 34.73).abs() < f64::EPSILON);
        assert!(center.is_in_range());
        assert!(!LatLon::new(91.0, 0.0).is_in_range());

        let json = serde_json::to_string(&center).unwrap();
        assert_eq!(json, r#"{"lat":34.73,"lon":36.7}"#);
    }
}

//! PROJ.4 definitions for the coordinate reference systems boundary files
//! are expected to arrive in.

use khalidiya_boundary_models::{Crs, WGS84_EPSG};

use crate::BoundaryError;

/// PROJ.4 definition of the target longitude/latitude system.
pub const WGS84_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// EPSG codes treated as spherical Web Mercator.
pub const WEB_MERCATOR_CODES: &[u32] = &[3857, 3785, 900_913];

/// Returns the PROJ.4 definition for `crs`.
///
/// Supported codes: 4326, `CRS84`, 4269 (NAD83), and WGS84 UTM zones
/// (32601-32660 north, 32701-32760 south). Raw `+proj=` strings pass
/// through. Web Mercator has no entry here; it is inverted in closed form
/// by the reprojector.
///
/// # Errors
///
/// Returns [`BoundaryError::UnsupportedCrs`] for any other code.
pub fn proj4_definition(crs: &Crs) -> Result<String, BoundaryError> {
    match crs {
        Crs::Crs84 | Crs::Epsg(WGS84_EPSG) => Ok(WGS84_PROJ4.to_string()),
        Crs::Epsg(4269) => Ok("+proj=longlat +datum=NAD83 +no_defs +type=crs".to_string()),
        Crs::Epsg(code @ 32601..=32660) => Ok(utm_proj4(code - 32600, false)),
        Crs::Epsg(code @ 32701..=32760) => Ok(utm_proj4(code - 32700, true)),
        Crs::Proj4(def) => Ok(def.clone()),
        Crs::Epsg(_) => Err(BoundaryError::UnsupportedCrs {
            name: crs.to_string(),
        }),
    }
}

/// Whether `crs` is spherical Web Mercator.
#[must_use]
pub fn is_web_mercator(crs: &Crs) -> bool {
    matches!(crs, Crs::Epsg(code) if WEB_MERCATOR_CODES.contains(code))
}

/// Whether a PROJ.4 definition describes a geographic (degree) system.
#[must_use]
pub fn is_geographic(definition: &str) -> bool {
    ["+proj=longlat", "+proj=latlong", "+proj=lonlat", "+proj=latlon"]
        .iter()
        .any(|p| definition.contains(p))
}

fn utm_proj4(zone: u32, south: bool) -> String {
    let south = if south { " +south" } else { "" };
    format!("+proj=utm +zone={zone}{south} +datum=WGS84 +units=m +no_defs +type=crs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utm_codes_map_to_zones() {
        assert_eq!(
            proj4_definition(&Crs::Epsg(32637)).unwrap(),
            "+proj=utm +zone=37 +datum=WGS84 +units=m +no_defs +type=crs"
        );
        assert_eq!(
            proj4_definition(&Crs::Epsg(32701)).unwrap(),
            "+proj=utm +zone=1 +south +datum=WGS84 +units=m +no_defs +type=crs"
        );
    }

    #[test]
    fn wgs84_variants_share_a_definition() {
        assert_eq!(proj4_definition(&Crs::Crs84).unwrap(), WGS84_PROJ4);
        assert_eq!(proj4_definition(&Crs::wgs84()).unwrap(), WGS84_PROJ4);
        assert!(is_geographic(WGS84_PROJ4));
        assert!(!is_geographic(&proj4_definition(&Crs::Epsg(32637)).unwrap()));
    }

    #[test]
    fn unknown_codes_are_unsupported() {
        let err = proj4_definition(&Crs::Epsg(2154)).unwrap_err();
        assert!(matches!(err, BoundaryError::UnsupportedCrs { ref name } if name == "EPSG:2154"));
    }

    #[test]
    fn web_mercator_aliases() {
        assert!(is_web_mercator(&Crs::Epsg(3857)));
        assert!(is_web_mercator(&Crs::Epsg(900_913)));
        assert!(!is_web_mercator(&Crs::Epsg(4326)));
    }
}

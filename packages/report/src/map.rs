//! Map section preparation.
//!
//! Normalizes the configured boundary and builds the [`MapView`] handed to
//! the map surface. Failures never escape: they become a localized message
//! in place of the map so the rest of the page still renders.

use std::path::Path;

use khalidiya_boundary::{boundary_to_geojson, normalize_file};
use khalidiya_report_models::{MapSection, MapSettings, MapView, OverlayStyle, ReportConfig};

use crate::ReportError;
use crate::tiles::resolve_tiles;

/// Builds the map section for one render.
///
/// The boundary path in the config is resolved against `base_dir`.
#[must_use]
pub fn build_map_section(config: &ReportConfig, base_dir: &Path) -> MapSection {
    let path = base_dir.join(&config.map.boundary_path);

    match prepare_map_view(&config.map, &path) {
        Ok(view) => MapSection::Ready(view),
        Err(e) => {
            log::warn!("Map section unavailable for {}: {e}", path.display());
            MapSection::Unavailable {
                message: format!("{}: {e}", config.load_error_prefix),
            }
        }
    }
}

/// Normalizes the boundary at `path` into a drawable [`MapView`].
///
/// # Errors
///
/// Returns [`ReportError::Boundary`] if normalization fails, or
/// [`ReportError::Json`] if the overlay cannot be serialized.
pub fn prepare_map_view(settings: &MapSettings, path: &Path) -> Result<MapView, ReportError> {
    let normalized = normalize_file(path)?;
    let overlay = serde_json::to_value(boundary_to_geojson(&normalized))?;

    Ok(MapView {
        center: normalized.center,
        zoom: settings.zoom,
        tiles: resolve_tiles(&settings.tiles),
        overlay,
        style: OverlayStyle {
            color: settings.stroke_color.clone(),
            weight: settings.stroke_weight,
        },
        width: settings.width,
        height: settings.height,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;
    use crate::config::default_config;

    #[test]
    fn ready_when_the_boundary_loads() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("khalidiya.geojson")).unwrap();
        file.write_all(
            br#"{"type":"Feature","properties":{},
                "geometry":{"type":"LineString","coordinates":[[36.70,34.73],[36.72,34.73],[36.72,34.75]]}}"#,
        )
        .unwrap();

        let mut config = default_config();
        config.map.boundary_path = "khalidiya.geojson".to_string();

        let MapSection::Ready(view) = build_map_section(&config, dir.path()) else {
            panic!("expected the map to be ready");
        };
        assert_eq!(view.zoom, 15);
        assert_eq!(view.tiles.id, "cartodbpositron");
        assert_eq!(view.style.color, "red");
        assert_eq!(view.style.weight, 3);
        assert!(view.center.is_in_range());
        assert_eq!(view.overlay["geometry"]["type"], "MultiPolygon");
    }

    #[test]
    fn unavailable_with_localized_message_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = default_config();
        config.map.boundary_path = "missing.geojson".to_string();

        match build_map_section(&config, dir.path()) {
            MapSection::Unavailable { message } => {
                assert!(message.starts_with("خطأ في تحميل البيانات: "), "{message}");
                assert!(message.contains("missing.geojson"), "{message}");
            }
            MapSection::Ready(_) => panic!("expected the map to be unavailable"),
        }
    }

    #[test]
    fn unavailable_when_dataset_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("empty.geojson"),
            r#"{"type":"FeatureCollection","features":[]}"#,
        )
        .unwrap();
        let mut config = default_config();
        config.map.boundary_path = "empty.geojson".to_string();

        assert!(matches!(
            build_map_section(&config, dir.path()),
            MapSection::Unavailable { .. }
        ));
    }
}

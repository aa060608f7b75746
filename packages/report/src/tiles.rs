//! Base tile layers the map can be drawn on.

use khalidiya_report_models::TileLayer;

const OSM_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;

const CARTO_ATTRIBUTION: &str = r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors &copy; <a href="https://carto.com/attributions">CARTO</a>"#;

/// Known tile ids: `(id, url_template, attribution)`.
const TILE_LAYERS: &[(&str, &str, &str)] = &[
    (
        "cartodbpositron",
        "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
        CARTO_ATTRIBUTION,
    ),
    (
        "cartodbdark_matter",
        "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        CARTO_ATTRIBUTION,
    ),
    (
        "openstreetmap",
        "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        OSM_ATTRIBUTION,
    ),
];

/// Resolves a tile id (case-insensitive) to its layer.
///
/// Unknown ids fall back to `OpenStreetMap`.
#[must_use]
pub fn resolve_tiles(id: &str) -> TileLayer {
    let wanted = id.trim().to_ascii_lowercase();

    let (id, url, attribution) = TILE_LAYERS
        .iter()
        .find(|(known, _, _)| *known == wanted)
        .copied()
        .unwrap_or_else(|| {
            log::warn!("Unknown tile layer '{id}', falling back to openstreetmap");
            TILE_LAYERS[2]
        });

    TileLayer {
        id: id.to_string(),
        url_template: url.to_string(),
        attribution: attribution.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_ids_case_insensitively() {
        let layer = resolve_tiles("CartoDBPositron");
        assert_eq!(layer.id, "cartodbpositron");
        assert!(layer.url_template.contains("light_all"));
        assert!(layer.attribution.contains("CARTO"));
    }

    #[test]
    fn unknown_id_falls_back_to_openstreetmap() {
        let layer = resolve_tiles("stamen-watercolor");
        assert_eq!(layer.id, "openstreetmap");
        assert!(layer.url_template.starts_with("https://tile.openstreetmap.org/"));
    }
}

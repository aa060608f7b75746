#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report configuration and presentation data types.
//!
//! [`ReportConfig`] is deserialized from TOML and carries every static
//! value the page shows: labels, palette, metrics, chart bars, the
//! embedded widget, map settings, and the ranges for the generated
//! building table. It is passed explicitly into each render.

use khalidiya_boundary_models::LatLon;
use serde::{Deserialize, Serialize};

/// Full configuration of the report page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Page heading.
    pub title: String,
    /// Line under the heading.
    pub subtitle: String,
    /// Browser tab title.
    pub page_title: String,
    /// Document language (e.g. `"ar"`).
    pub lang: String,
    /// Text direction, `"rtl"` or `"ltr"`.
    pub dir: String,
    /// CSS font-family applied to the whole page.
    pub font_family: String,
    /// Stylesheet URL that provides the font.
    pub font_stylesheet: String,
    /// Five accent colors used by cards, tabs, and the chart.
    pub palette: Vec<String>,
    /// Localized prefix shown before a map load error.
    pub load_error_prefix: String,
    /// Footer text.
    pub footer: String,
    /// Images shown in a row above the footer text.
    #[serde(default)]
    pub footer_logos: Vec<FooterLogo>,
    /// Tab labels.
    pub tabs: TabLabels,
    /// Headline stat cards.
    pub metrics: Vec<StatCard>,
    /// Damage-type bar chart.
    pub chart: ChartSettings,
    /// Third-party embedded map.
    pub widget: WidgetSettings,
    /// Boundary map.
    pub map: MapSettings,
    /// Generated building table.
    pub buildings: BuildingTableSettings,
    /// Filter controls next to the building table.
    pub filters: FilterSettings,
}

/// A small footer image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLogo {
    /// Image URL.
    pub src: String,
    /// Alternative text.
    pub alt: String,
}

/// Labels of the three page tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabLabels {
    pub statistics: String,
    pub maps: String,
    pub raw_data: String,
}

/// A single headline metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    /// Caption under the value.
    pub label: String,
    /// Preformatted value (e.g. `"63%"`).
    pub value: String,
}

/// Bar chart of damage categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub title: String,
    /// Axis caption for the categories.
    pub category_label: String,
    /// Axis caption for the percentages.
    pub value_label: String,
    pub bars: Vec<ChartBar>,
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBar {
    pub label: String,
    /// Share of buildings in this category, 0..=100.
    pub percent: u8,
}

/// The embedded third-party map widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSettings {
    pub title: String,
    /// Iframe source URL. Read-only and unauthenticated.
    pub url: String,
    /// Iframe height in pixels.
    pub height: u32,
}

/// Settings for the boundary map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSettings {
    pub title: String,
    /// Boundary file, relative to the report's base directory.
    pub boundary_path: String,
    /// Initial zoom level (0..=22).
    pub zoom: u8,
    /// Base tile layer id (e.g. `"cartodbpositron"`).
    pub tiles: String,
    /// Overlay stroke color.
    pub stroke_color: String,
    /// Overlay stroke width in pixels.
    pub stroke_weight: u32,
    /// Map width in pixels.
    pub width: u32,
    /// Map height in pixels.
    pub height: u32,
}

/// Ranges and labels for the generated building table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingTableSettings {
    pub title: String,
    /// Number of generated rows.
    pub rows: usize,
    /// Inclusive lower bound of the floor area in m².
    pub area_min: u32,
    /// Exclusive upper bound of the floor area in m².
    pub area_max: u32,
    /// Inclusive lower bound of the floor count.
    pub floors_min: u32,
    /// Exclusive upper bound of the floor count.
    pub floors_max: u32,
    /// Status labels to draw from.
    pub statuses: Vec<String>,
    pub area_label: String,
    pub floors_label: String,
    pub status_label: String,
}

/// Filter controls. They are shown but not bound to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSettings {
    pub title: String,
    pub status_label: String,
    pub floors_label: String,
    pub floors_min: u32,
    pub floors_max: u32,
    /// Initially selected floor range.
    pub floors_default: (u32, u32),
    pub apply_label: String,
}

/// One generated row of the building table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRecord {
    /// Floor area in m².
    pub area_sq_m: u32,
    /// Number of floors.
    pub floors: u32,
    /// Damage status label.
    pub status: String,
}

/// Base tile layer resolved from a tile id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    /// Tile id as configured.
    pub id: String,
    /// `{z}/{x}/{y}` URL template.
    pub url_template: String,
    /// Attribution HTML required by the provider.
    pub attribution: String,
}

/// Stroke style of the boundary overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub color: String,
    pub weight: u32,
}

/// Everything the map surface needs to draw the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
    pub tiles: TileLayer,
    /// Boundary as a `GeoJSON` feature.
    pub overlay: serde_json::Value,
    pub style: OverlayStyle,
    pub width: u32,
    pub height: u32,
}

/// Outcome of preparing the map section for one render.
#[derive(Debug, Clone, PartialEq)]
pub enum MapSection {
    /// The boundary loaded and the map can be drawn.
    Ready(MapView),
    /// Loading failed; the message is shown in place of the map.
    Unavailable {
        /// Localized, user-facing message.
        message: String,
    },
}

//! Report configuration loading.
//!
//! The Khalidiya report ships as an embedded TOML file; a different file
//! can be supplied at runtime. Either way the result is validated before
//! any render uses it.

use std::path::Path;

use khalidiya_report_models::ReportConfig;

use crate::ReportError;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config/khalidiya.toml");

/// Highest zoom level any supported tile provider serves.
const MAX_ZOOM: u8 = 22;

/// Returns the embedded Khalidiya report configuration.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. It is a compile-time
/// constant, so a failure is a development error caught by the tests.
#[must_use]
pub fn default_config() -> ReportConfig {
    toml::de::from_str(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("Failed to parse embedded report config: {e}"))
}

/// Loads the configuration from `path`, or the embedded default when
/// `path` is `None`, and validates it.
///
/// # Errors
///
/// Returns [`ReportError`] if the file cannot be read or parsed, or if it
/// fails [`validate`].
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig, ReportError> {
    let config = match path {
        Some(path) => {
            log::info!("Loading report config from {}", path.display());
            let text = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::de::from_str(&text)?
        }
        None => default_config(),
    };

    validate(&config)?;
    Ok(config)
}

/// Checks the invariants the renderer relies on.
///
/// # Errors
///
/// Returns [`ReportError::InvalidConfig`] describing the first problem
/// found.
pub fn validate(config: &ReportConfig) -> Result<(), ReportError> {
    let invalid = |message: String| Err(ReportError::InvalidConfig { message });

    if config.palette.is_empty() {
        return invalid("palette must contain at least one color".to_string());
    }
    if let Some(bar) = config.chart.bars.iter().find(|bar| bar.percent > 100) {
        return invalid(format!(
            "chart bar '{}' has percent {} (must be 0..=100)",
            bar.label, bar.percent
        ));
    }
    if config.map.zoom > MAX_ZOOM {
        return invalid(format!(
            "map zoom {} is above the maximum of {MAX_ZOOM}",
            config.map.zoom
        ));
    }

    let buildings = &config.buildings;
    if buildings.rows == 0 {
        return invalid("building table must have at least one row".to_string());
    }
    if buildings.area_min >= buildings.area_max {
        return invalid(format!(
            "building area range {}..{} is empty",
            buildings.area_min, buildings.area_max
        ));
    }
    if buildings.floors_min >= buildings.floors_max {
        return invalid(format!(
            "building floor range {}..{} is empty",
            buildings.floors_min, buildings.floors_max
        ));
    }
    if buildings.statuses.is_empty() {
        return invalid("building table needs at least one status".to_string());
    }

    let filters = &config.filters;
    let (low, high) = filters.floors_default;
    if filters.floors_min > filters.floors_max
        || low > high
        || low < filters.floors_min
        || high > filters.floors_max
    {
        return invalid(format!(
            "filter floor default {low}..={high} is outside {}..={}",
            filters.floors_min, filters.floors_max
        ));
    }

    Ok(())
}

//! Random building rows for the raw-data table.
//!
//! The rows are illustrative only and are regenerated on every render.

use khalidiya_report_models::{BuildingRecord, BuildingTableSettings};
use rand::Rng;
use rand::seq::IndexedRandom as _;

/// Generates `settings.rows` building records.
///
/// Area and floor count are drawn uniformly from the half-open ranges in
/// `settings`; the status is drawn uniformly from `settings.statuses`. An
/// empty range yields its lower bound.
pub fn generate_buildings<R: Rng + ?Sized>(
    settings: &BuildingTableSettings,
    rng: &mut R,
) -> Vec<BuildingRecord> {
    (0..settings.rows)
        .map(|_| BuildingRecord {
            area_sq_m: draw(rng, settings.area_min, settings.area_max),
            floors: draw(rng, settings.floors_min, settings.floors_max),
            status: settings.statuses.choose(rng).cloned().unwrap_or_default(),
        })
        .collect()
}

fn draw<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if min < max {
        rng.random_range(min..max)
    } else {
        min
    }
}

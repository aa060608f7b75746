//! HTTP handler functions for the report server.

use actix_web::{HttpResponse, web};
use khalidiya_boundary::{boundary_to_geojson, normalize_file};
use khalidiya_report::render_report;
use khalidiya_server_models::{ApiBoundary, ApiError, ApiHealth};

use crate::AppState;

/// `GET /`
///
/// Renders the report page. Boundary failures are shown inside the page,
/// so this always answers `200`.
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    let html = render_report(&state.config, &state.base_dir);

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/boundary`
///
/// Returns the normalized boundary, or `422` with the error message when
/// the boundary file cannot be normalized.
pub async fn boundary(state: web::Data<AppState>) -> HttpResponse {
    let path = state.base_dir.join(&state.config.map.boundary_path);

    let normalized = match normalize_file(&path) {
        Ok(normalized) => normalized,
        Err(e) => {
            log::warn!("Boundary request failed: {e}");
            return HttpResponse::UnprocessableEntity().json(ApiError {
                error: e.to_string(),
            });
        }
    };

    match serde_json::to_value(boundary_to_geojson(&normalized)) {
        Ok(feature) => HttpResponse::Ok().json(ApiBoundary {
            center: normalized.center,
            empty: normalized.is_empty(),
            feature,
        }),
        Err(e) => {
            log::error!("Failed to serialize boundary: {e}");
            HttpResponse::InternalServerError().json(ApiError {
                error: e.to_string(),
            })
        }
    }
}

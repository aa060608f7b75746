#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the reconstruction report.
//!
//! Every `GET /` renders the page from scratch: the boundary file is read
//! and normalized and a new random building table is drawn. The normalized
//! boundary is also exposed as JSON at `/api/boundary`.

mod handlers;

use std::path::PathBuf;

use actix_web::{App, HttpServer, middleware, web};
use khalidiya_report_models::ReportConfig;

/// Shared application state. Immutable for the lifetime of the server.
pub struct AppState {
    /// Report configuration passed into every render.
    pub config: ReportConfig,
    /// Directory the configured boundary path is resolved against.
    pub base_dir: PathBuf,
}

/// Registers the report routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index)).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/boundary", web::get().to(handlers::boundary)),
    );
}

/// Starts the report server.
///
/// Binds to `BIND_ADDR` (default `127.0.0.1`) and `PORT` (default `8080`).
/// This is a regular async function; the caller provides the runtime.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ReportConfig, base_dir: PathBuf) -> std::io::Result<()> {
    let state = web::Data::new(AppState { config, base_dir });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

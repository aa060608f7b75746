#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the reconstruction report server.
//!
//! Reads an optional config path from `REPORT_CONFIG` and serves from the
//! current working directory.

use std::path::PathBuf;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var_os("REPORT_CONFIG").map(PathBuf::from);
    let config = khalidiya_report::config::load_config(config_path.as_deref())?;
    let base_dir = std::env::current_dir()?;

    khalidiya_server::run_server(config, base_dir).await?;

    Ok(())
}

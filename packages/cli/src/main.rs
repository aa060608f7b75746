#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the reconstruction report.
//!
//! Renders the page to a file, prints the normalized boundary as
//! `GeoJSON`, or starts the report server.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "khalidiya_cli", about = "Khalidiya reconstruction report tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the report page to an HTML file
    Render {
        /// Report config (TOML); the embedded Khalidiya config when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory the boundary path is resolved against
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
        /// Output file
        #[arg(long, default_value = "report.html")]
        out: PathBuf,
    },
    /// Normalize a boundary file and print it as a `GeoJSON` feature
    Boundary {
        /// `GeoJSON` boundary file
        path: PathBuf,
    },
    /// Serve the report over HTTP (`BIND_ADDR`, `PORT`)
    Serve {
        /// Report config (TOML); the embedded Khalidiya config when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory the boundary path is resolved against
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            base_dir,
            out,
        } => {
            let config = khalidiya_report::config::load_config(config.as_deref())?;
            let html = khalidiya_report::render_report(&config, &base_dir);
            std::fs::write(&out, html)?;
            log::info!("Report written to {}", out.display());
        }
        Commands::Boundary { path } => {
            let normalized = khalidiya_boundary::normalize_file(&path)?;
            let feature = khalidiya_boundary::boundary_to_geojson(&normalized);
            println!("{}", serde_json::to_string_pretty(&feature)?);
        }
        Commands::Serve { config, base_dir } => {
            let config = khalidiya_report::config::load_config(config.as_deref())?;
            actix_web::rt::System::new()
                .block_on(khalidiya_server::run_server(config, base_dir))?;
        }
    }

    Ok(())
}

//! Airq RPC Server - JSON-RPC backend for the air quality dashboard.
//!
//! This binary loads the station dataset once and serves the analyses from
//! airq-core over JSON-RPC 2.0, plus a CSV download route.

mod handlers;
mod server;
mod wrapper;

use airq_core::{AirqApi, DashboardSettings};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "airq-rpc")]
#[command(about = "JSON-RPC server for the air quality dashboard")]
struct Args {
    /// Station measurements CSV (defaults to data/all_stations_cleaned.csv)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Optional TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on (0 = auto-assign)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Merge the settings file with command-line overrides.
fn resolve_settings(args: &Args) -> Result<DashboardSettings> {
    let mut settings = match &args.config {
        Some(path) => DashboardSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => DashboardSettings::default(),
    };
    if let Some(data) = &args.data {
        settings.data_path = data.clone();
    }
    if let Some(host) = &args.host {
        settings.host = host.clone();
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting Airq RPC Server");

    let settings = resolve_settings(&args)?;
    let host = settings.host.clone();
    let port = settings.port;
    info!("Data file: {}", settings.data_path.display());

    let api = AirqApi::builder(settings.data_path.clone())
        .settings(settings)
        .build()
        .await
        .context("Failed to load dashboard data")?;

    let server = server::start_server(api, &host, port).await?;

    // Print port for the front end to read (intentional stdout for IPC)
    println!("RPC_PORT={}", server.addr.port());

    info!("RPC server running on {}", server.addr);

    // Run until Ctrl-C or a `shutdown` RPC call
    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received, exiting");
        }
        stopped = server.task => {
            stopped.context("Server task failed")?;
            info!("Server stopped, exiting");
        }
    }

    Ok(())
}

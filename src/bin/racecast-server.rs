// ABOUTME: Racecast HTTP server binary
// ABOUTME: Loads environment configuration, initializes logging, and serves the prediction API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Racecast Server Binary
//!
//! Starts the race-time prediction API. Configuration comes from the
//! environment; the listener address may be overridden on the command line.

use anyhow::Result;
use clap::Parser;
use racecast::{config::ServerConfig, logging, server};
use tracing::{error, info};

/// Command line arguments
#[derive(Parser)]
#[command(name = "racecast-server")]
#[command(about = "Racecast - race-time prediction API over a runner's activity history")]
pub struct Args {
    /// Override listener host
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Racecast server");
    info!("{}", config.summary());

    if let Err(e) = server::run(&config).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}

// ABOUTME: Main server binary for the weekly muscle analytics API
// ABOUTME: Loads configuration, prepares the database, and starts the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepWise

//! # RepWise Analytics Server Binary
//!
//! Starts the weekly muscle analytics HTTP API: configuration from the
//! environment, SQLite schema migration, then the axum serve loop.

use anyhow::Result;
use clap::Parser;
use repwise_analytics::{
    config::environment::ServerConfig,
    database::Database,
    logging,
    server::{AnalyticsServer, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "repwise-server")]
#[command(about = "RepWise Analytics - Weekly muscle group training insights API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting RepWise Analytics server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    database.migrate().await?;
    info!("Database ready: {}", config.database.url);

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, Arc::new(config)));

    info!("Endpoints:");
    info!("  GET  http://localhost:{port}/health");
    info!("  GET  http://localhost:{port}/analytics/weekly");
    info!("  GET  http://localhost:{port}/preferences");
    info!("  POST http://localhost:{port}/preferences");
    info!("  GET  http://localhost:{port}/preferences/warnings");
    info!("  POST http://localhost:{port}/preferences/warnings/dismiss");
    info!("  POST http://localhost:{port}/preferences/warnings/reset");
    info!("  GET  http://localhost:{port}/muscle-groups");

    AnalyticsServer::new(resources).run().await?;
    Ok(())
}

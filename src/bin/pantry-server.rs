// ABOUTME: Server binary for the Pantry food API
// ABOUTME: Loads configuration, opens the database, and serves the HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! # Pantry Server Binary
//!
//! Starts the recipe catalog and authentication API.

use anyhow::Result;
use clap::Parser;
use pantry_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pantry-server")]
#[command(about = "Pantry Food API - recipe, ingredient and nutrition lookup")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. sqlite:./data/pantry.db)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }

    info!("Starting Pantry server");
    info!("{}", config.summary());

    let database = Database::new(&config.database).await?;
    let resources = Arc::new(ServerResources::new(database, config));

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}

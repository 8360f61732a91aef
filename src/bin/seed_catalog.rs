// ABOUTME: Catalog seeding utility for the Pantry food API
// ABOUTME: Imports recipes, ingredients, and nutrition from a JSON catalog file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Catalog seeder.
//!
//! Usage:
//! ```bash
//! # Import a catalog (uses DATABASE_URL from environment)
//! cargo run --bin seed-catalog -- --file data/catalog.json
//!
//! # Override database URL
//! cargo run --bin seed-catalog -- --file data/catalog.json --database-url sqlite:./data/pantry.db
//! ```
//!
//! The file holds a JSON array of recipes:
//! `[{"recipe_id": 1, "recipe_name": "...", "nutrition": {...}, "ingredients": [...]}]`

use anyhow::Result;
use clap::Parser;
use pantry_server::{
    config::{DatabaseConfig, DatabaseUrl},
    database::Database,
    logging::{LogFormat, LoggingConfig},
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "Pantry catalog seeder",
    long_about = "Import recipes, ingredients and nutrition from a JSON catalog file"
)]
struct SeedArgs {
    /// Catalog file (JSON array of recipes)
    #[arg(long, short = 'f')]
    file: PathBuf,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    LoggingConfig {
        level: if args.verbose { "debug" } else { "info" }.into(),
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    }
    .init()?;

    let mut config = DatabaseConfig::from_env()?;
    if let Some(url) = args.database_url.as_deref() {
        config.url = DatabaseUrl::parse_url(url)?;
    }
    config.auto_migrate = true;

    info!("Seeding catalog from {} into {}", args.file.display(), config.url);
    let database = Database::new(&config).await?;
    let summary = database.catalog_importer().import_file(&args.file).await?;
    database.close().await;

    info!(
        "Imported {} recipes, {} ingredients, {} links, {} nutrition rows",
        summary.recipes, summary.ingredients, summary.links, summary.nutrition
    );
    Ok(())
}

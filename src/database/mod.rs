// ABOUTME: SQLite connection pool, schema migrations, and per-domain database managers
// ABOUTME: Owns the catalog tables (recipes, ingredients, nutrition) and the user tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! # Database Management
//!
//! This module owns the `SQLite` pool shared by every request. Handlers never hold
//! a connection across requests: each query borrows one from the pool and returns
//! it on completion, whether the query succeeded or not.

/// Catalog import (the data-loading side of the recipe tables)
pub mod catalog;
/// Read-only recipe and ingredient queries
pub mod recipes;
/// User accounts and password reset tokens
pub mod users;

pub use catalog::{CatalogImporter, CatalogIngredient, CatalogNutrition, CatalogRecipe, ImportSummary};
pub use recipes::RecipeManager;
pub use users::UserManager;

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Database handle shared across requests
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool and, when configured, run migrations
    ///
    /// In-memory databases live inside a single connection, so the pool is pinned
    /// to exactly one connection that is never recycled.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or migration fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = &config.url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::config(format!(
                        "Cannot create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let connect_options =
            SqliteConnectOptions::from_str(&config.url.to_connection_string())?
                .create_if_missing(true)
                .foreign_keys(true);

        let pool_options = if config.url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(connect_options).await?;
        let db = Self { pool };

        if config.auto_migrate {
            db.migrate().await?;
        }

        info!(url = %config.url, "Database initialized");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Recipe query manager bound to this pool
    #[must_use]
    pub fn recipes(&self) -> RecipeManager {
        RecipeManager::new(self.pool.clone())
    }

    /// User manager bound to this pool
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Catalog importer bound to this pool
    #[must_use]
    pub fn catalog_importer(&self) -> CatalogImporter {
        CatalogImporter::new(self.pool.clone())
    }

    /// Check that the store answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is closed or the query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection; later queries fail
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_catalog().await?;
        self.migrate_users().await?;
        Ok(())
    }

    /// Create recipe, ingredient, join, and nutrition tables
    async fn migrate_catalog(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                recipe_id INTEGER PRIMARY KEY,
                recipe_name TEXT NOT NULL,
                recipe_name_folded TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                ingredient_id INTEGER PRIMARY KEY,
                ingredient_name TEXT NOT NULL,
                ingredient_name_folded TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id INTEGER NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(ingredient_id) ON DELETE CASCADE,
                PRIMARY KEY (recipe_id, ingredient_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS nutrition (
                nutrition_id INTEGER PRIMARY KEY,
                recipe_id INTEGER NOT NULL UNIQUE REFERENCES recipes(recipe_id) ON DELETE CASCADE,
                calories_100g REAL NOT NULL DEFAULT 0,
                fat_100g REAL NOT NULL DEFAULT 0,
                sugar_100g REAL NOT NULL DEFAULT 0,
                protein_100g REAL NOT NULL DEFAULT 0,
                nutrition_type TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient ON recipe_ingredients(ingredient_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_name ON recipes(recipe_name_folded)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(ingredient_name_folded)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

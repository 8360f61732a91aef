// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, a seeded sample catalog, and server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pantry_server`
//!
//! Sample catalog:
//!
//! | recipe | name                   | nutrition        | ingredients          |
//! |--------|------------------------|------------------|----------------------|
//! | 101    | Chocolate Cake         | dessert          | 3 Chocolate, 7 Flour |
//! | 102    | Plain Rice             | none             | none                 |
//! | 103    | Chocolate Chip Cookies | snack            | 3 Chocolate, 9 Butter|
//! | 104    | Tomato Soup            | untyped          | 12 Tomato            |
//! | 105    | Flour Tortilla         | bread            | 7 Flour              |

use pantry_server::{
    config::ServerConfig,
    database::{CatalogIngredient, CatalogNutrition, CatalogRecipe, Database},
    server::{build_router, ServerResources},
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Empty, migrated in-memory database
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new(&ServerConfig::for_testing().database)
        .await
        .expect("Failed to create test database")
}

/// In-memory database loaded with [`sample_catalog`]
pub async fn create_seeded_database() -> Database {
    let database = create_test_database().await;
    database
        .catalog_importer()
        .import(&sample_catalog())
        .await
        .expect("Failed to seed sample catalog");
    database
}

fn ingredient(id: i64, name: &str) -> CatalogIngredient {
    CatalogIngredient {
        ingredient_id: id,
        ingredient_name: name.to_owned(),
    }
}

fn nutrition(calories: f64, fat: f64, sugar: f64, protein: f64, kind: Option<&str>) -> CatalogNutrition {
    CatalogNutrition {
        calories_100g: calories,
        fat_100g: fat,
        sugar_100g: sugar,
        protein_100g: protein,
        nutrition_type: kind.map(ToOwned::to_owned),
    }
}

/// Recipe whose names only match case-insensitively with Unicode folding
pub fn accented_recipe() -> CatalogRecipe {
    CatalogRecipe {
        recipe_id: 106,
        recipe_name: "CRÈME BRÛLÉE".to_owned(),
        nutrition: Some(nutrition(330.0, 25.0, 27.0, 4.5, Some("dessert"))),
        ingredients: vec![ingredient(15, "CRÈME FRAÎCHE")],
    }
}

/// Five recipes covering every association shape
pub fn sample_catalog() -> Vec<CatalogRecipe> {
    vec![
        CatalogRecipe {
            recipe_id: 101,
            recipe_name: "Chocolate Cake".to_owned(),
            nutrition: Some(nutrition(371.0, 15.1, 36.6, 5.0, Some("dessert"))),
            ingredients: vec![ingredient(3, "Chocolate"), ingredient(7, "Flour")],
        },
        CatalogRecipe {
            recipe_id: 102,
            recipe_name: "Plain Rice".to_owned(),
            nutrition: None,
            ingredients: Vec::new(),
        },
        CatalogRecipe {
            recipe_id: 103,
            recipe_name: "Chocolate Chip Cookies".to_owned(),
            nutrition: Some(nutrition(488.0, 24.0, 35.0, 5.5, Some("snack"))),
            ingredients: vec![ingredient(3, "Chocolate"), ingredient(9, "Butter")],
        },
        CatalogRecipe {
            recipe_id: 104,
            recipe_name: "Tomato Soup".to_owned(),
            nutrition: Some(nutrition(30.0, 0.5, 4.0, 1.2, None)),
            ingredients: vec![ingredient(12, "Tomato")],
        },
        CatalogRecipe {
            recipe_id: 105,
            recipe_name: "Flour Tortilla".to_owned(),
            nutrition: Some(nutrition(310.0, 7.0, 1.5, 8.2, Some("bread"))),
            ingredients: vec![ingredient(7, "Flour")],
        },
    ]
}

/// Server resources over a database with the testing configuration
pub fn create_test_resources(database: Database) -> Arc<ServerResources> {
    create_test_resources_with_config(database, ServerConfig::for_testing())
}

/// Server resources over a database with a caller-supplied configuration
pub fn create_test_resources_with_config(
    database: Database,
    config: ServerConfig,
) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(database, config))
}

/// Full router over the seeded sample catalog
pub async fn create_seeded_router() -> (axum::Router, Arc<ServerResources>) {
    let resources = create_test_resources(create_seeded_database().await);
    (build_router(Arc::clone(&resources)), resources)
}

// ABOUTME: Catalog import for recipes, ingredients, join rows, and nutrition
// ABOUTME: Idempotent upserts inside a single transaction, fed from JSON catalog files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Catalog loading
//!
//! The query layer never writes. This importer is the only code path that
//! creates or updates catalog rows, and it is used by the `seed-catalog` binary
//! and by tests to build fixtures.

use crate::database::recipes::fold_name;
use crate::errors::{AppError, AppResult};
use crate::models::{IngredientId, RecipeId};
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Ingredient entry of a catalog recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIngredient {
    /// Ingredient identity, shared across recipes
    pub ingredient_id: IngredientId,
    /// Ingredient name
    pub ingredient_name: String,
}

/// Nutrition facts per 100g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogNutrition {
    /// kcal per 100g
    #[serde(default)]
    pub calories_100g: f64,
    /// Fat grams per 100g
    #[serde(default)]
    pub fat_100g: f64,
    /// Sugar grams per 100g
    #[serde(default)]
    pub sugar_100g: f64,
    /// Protein grams per 100g
    #[serde(default)]
    pub protein_100g: f64,
    /// Category label
    #[serde(default, rename = "type", alias = "nutrition_type")]
    pub nutrition_type: Option<String>,
}

/// One recipe as it appears in a catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecipe {
    /// Recipe identity
    pub recipe_id: RecipeId,
    /// Recipe name
    pub recipe_name: String,
    /// Nutrition row; `None` removes any stored row
    #[serde(default)]
    pub nutrition: Option<CatalogNutrition>,
    /// Ingredients; replaces the stored join rows
    #[serde(default)]
    pub ingredients: Vec<CatalogIngredient>,
}

/// Counts written by an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Recipes inserted or updated
    pub recipes: usize,
    /// Distinct ingredients inserted or updated
    pub ingredients: usize,
    /// Recipe_Ingredient rows written
    pub links: usize,
    /// Nutrition rows inserted or updated
    pub nutrition: usize,
}

/// Writes catalog data into the recipe tables
#[derive(Clone)]
pub struct CatalogImporter {
    pool: SqlitePool,
}

impl CatalogImporter {
    /// Create a new importer over the shared pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read a JSON array of recipes from disk and import it
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a valid catalog, or the import fails
    pub async fn import_file(&self, path: &Path) -> AppResult<ImportSummary> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::invalid_input(format!("Cannot read catalog {}: {e}", path.display()))
        })?;
        let recipes: Vec<CatalogRecipe> = serde_json::from_str(&raw).map_err(|e| {
            AppError::invalid_input(format!("Invalid catalog {}: {e}", path.display()))
        })?;
        self.import(&recipes).await
    }

    /// Upsert every recipe with its nutrition and ingredients
    ///
    /// All rows are written in one transaction: a failure leaves the tables untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn import(&self, recipes: &[CatalogRecipe]) -> AppResult<ImportSummary> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin catalog import: {e}")))?;

        let mut summary = ImportSummary::default();
        let mut seen_ingredients = HashSet::new();

        for recipe in recipes {
            upsert_recipe(&mut tx, recipe).await?;
            summary.recipes += 1;

            for ingredient in &recipe.ingredients {
                if seen_ingredients.insert(ingredient.ingredient_id) {
                    upsert_ingredient(&mut tx, ingredient).await?;
                    summary.ingredients += 1;
                }
            }

            summary.links += replace_links(&mut tx, recipe).await?;

            if upsert_nutrition(&mut tx, recipe).await? {
                summary.nutrition += 1;
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit catalog import: {e}")))?;

        info!(
            recipes = summary.recipes,
            ingredients = summary.ingredients,
            links = summary.links,
            nutrition = summary.nutrition,
            "Catalog imported"
        );
        Ok(summary)
    }
}

async fn upsert_recipe(tx: &mut Transaction<'_, Sqlite>, recipe: &CatalogRecipe) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO recipes (recipe_id, recipe_name, recipe_name_folded)
        VALUES ($1, $2, $3)
        ON CONFLICT(recipe_id) DO UPDATE SET
            recipe_name = excluded.recipe_name,
            recipe_name_folded = excluded.recipe_name_folded
        ",
    )
    .bind(recipe.recipe_id)
    .bind(&recipe.recipe_name)
    .bind(fold_name(&recipe.recipe_name))
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to upsert recipe {}: {e}", recipe.recipe_id)))?;
    Ok(())
}

async fn upsert_ingredient(
    tx: &mut Transaction<'_, Sqlite>,
    ingredient: &CatalogIngredient,
) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO ingredients (ingredient_id, ingredient_name, ingredient_name_folded)
        VALUES ($1, $2, $3)
        ON CONFLICT(ingredient_id) DO UPDATE SET
            ingredient_name = excluded.ingredient_name,
            ingredient_name_folded = excluded.ingredient_name_folded
        ",
    )
    .bind(ingredient.ingredient_id)
    .bind(&ingredient.ingredient_name)
    .bind(fold_name(&ingredient.ingredient_name))
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        AppError::database(format!(
            "Failed to upsert ingredient {}: {e}",
            ingredient.ingredient_id
        ))
    })?;
    Ok(())
}

async fn replace_links(
    tx: &mut Transaction<'_, Sqlite>,
    recipe: &CatalogRecipe,
) -> AppResult<usize> {
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
        .bind(recipe.recipe_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to clear recipe ingredients: {e}")))?;

    let mut written = 0;
    for ingredient in &recipe.ingredients {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO recipe_ingredients (recipe_id, ingredient_id) VALUES ($1, $2)",
        )
        .bind(recipe.recipe_id)
        .bind(ingredient.ingredient_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to link recipe ingredient: {e}")))?;
        written += result.rows_affected() as usize;
    }
    Ok(written)
}

async fn upsert_nutrition(
    tx: &mut Transaction<'_, Sqlite>,
    recipe: &CatalogRecipe,
) -> AppResult<bool> {
    let Some(nutrition) = &recipe.nutrition else {
        sqlx::query("DELETE FROM nutrition WHERE recipe_id = $1")
            .bind(recipe.recipe_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear nutrition: {e}")))?;
        return Ok(false);
    };

    sqlx::query(
        r"
        INSERT INTO nutrition (recipe_id, calories_100g, fat_100g, sugar_100g, protein_100g, nutrition_type)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT(recipe_id) DO UPDATE SET
            calories_100g = excluded.calories_100g,
            fat_100g = excluded.fat_100g,
            sugar_100g = excluded.sugar_100g,
            protein_100g = excluded.protein_100g,
            nutrition_type = excluded.nutrition_type
        ",
    )
    .bind(recipe.recipe_id)
    .bind(nutrition.calories_100g)
    .bind(nutrition.fat_100g)
    .bind(nutrition.sugar_100g)
    .bind(nutrition.protein_100g)
    .bind(&nutrition.nutrition_type)
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to upsert nutrition: {e}")))?;
    Ok(true)
}

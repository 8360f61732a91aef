// ABOUTME: Read-only recipe and ingredient queries with batched association loading
// ABOUTME: Name search, ingredient-set search, and capped bulk fetches over the catalog tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Recipe query layer
//!
//! Every recipe-returning query runs one statement for the primary rows and then
//! at most two more for associations (nutrition, then join rows with their
//! ingredient), regardless of how many recipes matched. Id sets are passed to
//! `SQLite` as a single JSON array and expanded with `json_each`, so the number
//! of bound parameters never grows with the input.
//!
//! Ordering is by ascending `recipe_id` (or `ingredient_id`) throughout. When a
//! limit truncates a result, the lowest identities are the ones kept.
//!
//! `SQLite`'s `LOWER()` only folds ASCII, so name searches match against
//! `*_name_folded` columns that the importer fills with [`fold_name`]. The
//! pattern goes through the same function, which keeps accented names such as
//! "CRÈME BRÛLÉE" reachable by "crème".

use crate::errors::{AppError, AppResult};
use crate::models::{
    Ingredient, IngredientId, Nutrition, Recipe, RecipeAssociations, RecipeId, RecipeIngredient,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::HashMap;
use tracing::debug;

/// Query manager for the recipe catalog
#[derive(Clone)]
pub struct RecipeManager {
    pool: SqlitePool,
}

impl RecipeManager {
    /// Create a new manager over the shared pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch up to `limit` recipes with the requested associations
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or a row is malformed
    pub async fn fetch_all(
        &self,
        limit: u32,
        associations: RecipeAssociations,
    ) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT recipe_id, recipe_name
            FROM recipes
            ORDER BY recipe_id
            LIMIT $1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        let mut recipes = rows.iter().map(row_to_recipe).collect::<AppResult<Vec<_>>>()?;
        self.load_associations(&mut recipes, associations).await?;

        debug!(limit, count = recipes.len(), "Fetched recipes");
        Ok(recipes)
    }

    /// Every ingredient row, uncapped
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached
    pub async fn fetch_all_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query(
            r"
            SELECT ingredient_id, ingredient_name
            FROM ingredients
            ORDER BY ingredient_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        rows.iter().map(row_to_ingredient).collect()
    }

    /// Case-insensitive substring search over recipe names
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached
    pub async fn search_recipes_by_name(
        &self,
        name_pattern: &str,
        limit: u32,
    ) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT recipe_id, recipe_name
            FROM recipes
            WHERE recipe_name_folded LIKE $1 ESCAPE '\'
            ORDER BY recipe_id
            LIMIT $2
            ",
        )
        .bind(contains_pattern(name_pattern))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to search recipes by name: {e}")))?;

        let mut recipes = rows.iter().map(row_to_recipe).collect::<AppResult<Vec<_>>>()?;
        self.load_associations(&mut recipes, RecipeAssociations::ALL)
            .await?;

        debug!(pattern = name_pattern, count = recipes.len(), "Recipe name search");
        Ok(recipes)
    }

    /// Case-insensitive substring search over ingredient names
    ///
    /// No cap is applied: a short pattern can match a large share of the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached
    pub async fn search_ingredient_ids_by_name(
        &self,
        name_pattern: &str,
    ) -> AppResult<Vec<IngredientId>> {
        let rows = sqlx::query(
            r"
            SELECT ingredient_id
            FROM ingredients
            WHERE ingredient_name_folded LIKE $1 ESCAPE '\'
            ORDER BY ingredient_id
            ",
        )
        .bind(contains_pattern(name_pattern))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to search ingredients by name: {e}")))?;

        rows.iter()
            .map(|row| {
                row.try_get::<i64, _>("ingredient_id")
                    .map_err(|e| AppError::database(format!("Invalid ingredient row: {e}")))
            })
            .collect()
    }

    /// Recipes containing any of the given ingredients
    ///
    /// Each recipe appears once no matter how many of the ids it contains.
    /// De-duplication happens before `limit` is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached
    pub async fn search_recipes_by_ingredient_ids(
        &self,
        ingredient_ids: &[IngredientId],
        limit: u32,
    ) -> AppResult<Vec<Recipe>> {
        if ingredient_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            r"
            SELECT r.recipe_id, r.recipe_name
            FROM recipes r
            WHERE r.recipe_id IN (
                SELECT DISTINCT ri.recipe_id
                FROM recipe_ingredients ri
                WHERE ri.ingredient_id IN (SELECT value FROM json_each($1))
            )
            ORDER BY r.recipe_id
            LIMIT $2
            ",
        )
        .bind(id_array(ingredient_ids)?)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to search recipes by ingredient ids: {e}"))
        })?;

        let mut recipes = rows.iter().map(row_to_recipe).collect::<AppResult<Vec<_>>>()?;
        self.load_associations(&mut recipes, RecipeAssociations::ALL)
            .await?;

        debug!(
            requested = ingredient_ids.len(),
            count = recipes.len(),
            "Recipe ingredient search"
        );
        Ok(recipes)
    }

    /// Populate associations for an already-fetched batch of recipes
    async fn load_associations(
        &self,
        recipes: &mut [Recipe],
        associations: RecipeAssociations,
    ) -> AppResult<()> {
        if recipes.is_empty() || associations.is_empty() {
            return Ok(());
        }

        let recipe_ids: Vec<RecipeId> = recipes.iter().map(|r| r.recipe_id).collect();
        let ids_json = id_array(&recipe_ids)?;
        let index: HashMap<RecipeId, usize> = recipe_ids
            .iter()
            .enumerate()
            .map(|(position, id)| (*id, position))
            .collect();

        if associations.contains(RecipeAssociations::NUTRITION) {
            let rows = sqlx::query(
                r"
                SELECT nutrition_id, recipe_id, calories_100g, fat_100g,
                       sugar_100g, protein_100g, nutrition_type
                FROM nutrition
                WHERE recipe_id IN (SELECT value FROM json_each($1))
                ",
            )
            .bind(&ids_json)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load nutrition: {e}")))?;

            for row in &rows {
                let nutrition = row_to_nutrition(row)?;
                if let Some(&position) = index.get(&nutrition.recipe_id) {
                    recipes[position].nutrition = Some(nutrition);
                }
            }
        }

        if associations.contains(RecipeAssociations::INGREDIENTS) {
            let rows = sqlx::query(
                r"
                SELECT ri.recipe_id, ri.ingredient_id, i.ingredient_name
                FROM recipe_ingredients ri
                LEFT JOIN ingredients i ON i.ingredient_id = ri.ingredient_id
                WHERE ri.recipe_id IN (SELECT value FROM json_each($1))
                ORDER BY ri.recipe_id, ri.ingredient_id
                ",
            )
            .bind(&ids_json)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load recipe ingredients: {e}")))?;

            for row in &rows {
                let join_row = row_to_recipe_ingredient(row)?;
                if let Some(&position) = index.get(&join_row.recipe_id) {
                    recipes[position].recipe_ingredients.push(join_row);
                }
            }
        }

        Ok(())
    }
}

/// Escape `LIKE` wildcards and wrap in `%...%`, lowercased
/// Case fold used for both stored names and search patterns
#[must_use]
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

fn contains_pattern(name_pattern: &str) -> String {
    let mut escaped = String::with_capacity(name_pattern.len() + 2);
    escaped.push('%');
    for c in fold_name(name_pattern).chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn id_array(ids: &[i64]) -> AppResult<String> {
    Ok(serde_json::to_string(ids)?)
}

fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let recipe_id: i64 = row
        .try_get("recipe_id")
        .map_err(|e| AppError::database(format!("Invalid recipe row: {e}")))?;
    let recipe_name: String = row
        .try_get("recipe_name")
        .map_err(|e| AppError::database(format!("Invalid recipe row: {e}")))?;
    Ok(Recipe::new(recipe_id, recipe_name))
}

fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
    Ok(Ingredient {
        ingredient_id: row
            .try_get("ingredient_id")
            .map_err(|e| AppError::database(format!("Invalid ingredient row: {e}")))?,
        ingredient_name: row
            .try_get("ingredient_name")
            .map_err(|e| AppError::database(format!("Invalid ingredient row: {e}")))?,
    })
}

fn row_to_nutrition(row: &SqliteRow) -> AppResult<Nutrition> {
    let invalid = |e: sqlx::Error| AppError::database(format!("Invalid nutrition row: {e}"));
    Ok(Nutrition {
        nutrition_id: row.try_get("nutrition_id").map_err(invalid)?,
        recipe_id: row.try_get("recipe_id").map_err(invalid)?,
        calories_100g: row.try_get("calories_100g").map_err(invalid)?,
        fat_100g: row.try_get("fat_100g").map_err(invalid)?,
        sugar_100g: row.try_get("sugar_100g").map_err(invalid)?,
        protein_100g: row.try_get("protein_100g").map_err(invalid)?,
        nutrition_type: row.try_get("nutrition_type").map_err(invalid)?,
    })
}

fn row_to_recipe_ingredient(row: &SqliteRow) -> AppResult<RecipeIngredient> {
    let invalid = |e: sqlx::Error| AppError::database(format!("Invalid recipe ingredient row: {e}"));
    let recipe_id: i64 = row.try_get("recipe_id").map_err(invalid)?;
    let ingredient_id: i64 = row.try_get("ingredient_id").map_err(invalid)?;
    let ingredient_name: Option<String> = row.try_get("ingredient_name").map_err(invalid)?;

    Ok(RecipeIngredient {
        recipe_id,
        ingredient_id,
        ingredient: ingredient_name.map(|ingredient_name| Ingredient {
            ingredient_id,
            ingredient_name,
        }),
    })
}

// ABOUTME: Catalog business logic between the food routes and the recipe query layer
// ABOUTME: Applies configured row caps, projects recipes, and shapes infrastructure failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

use crate::config::CatalogLimits;
use crate::constants::error_messages;
use crate::database::RecipeManager;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{Ingredient, IngredientId, RecipeAssociations, RecipeWithNutritionDto};
use crate::projection::project_recipes;
use std::time::Instant;

/// Food catalog service
#[derive(Clone)]
pub struct FoodService {
    recipes: RecipeManager,
    limits: CatalogLimits,
}

impl FoodService {
    /// Create a service over a recipe manager with the given caps
    #[must_use]
    pub const fn new(recipes: RecipeManager, limits: CatalogLimits) -> Self {
        Self { recipes, limits }
    }

    /// Recipes up to the full cap
    ///
    /// # Errors
    ///
    /// Returns a database error prefixed with the recipe retrieval message
    pub async fn list_recipes(&self) -> AppResult<Vec<RecipeWithNutritionDto>> {
        self.list_recipes_capped("list_recipes", self.limits.full_limit)
            .await
    }

    /// Recipes up to the preview cap
    ///
    /// # Errors
    ///
    /// Returns a database error prefixed with the recipe retrieval message
    pub async fn preview_recipes(&self) -> AppResult<Vec<RecipeWithNutritionDto>> {
        self.list_recipes_capped("preview_recipes", self.limits.preview_limit)
            .await
    }

    async fn list_recipes_capped(
        &self,
        operation: &str,
        limit: u32,
    ) -> AppResult<Vec<RecipeWithNutritionDto>> {
        let started = Instant::now();
        let recipes = self
            .recipes
            .fetch_all(limit, RecipeAssociations::ALL)
            .await
            .map_err(recipe_failure)?;

        log_query(operation, recipes.len(), started);
        Ok(project_recipes(&recipes))
    }

    /// Every ingredient
    ///
    /// # Errors
    ///
    /// Returns a database error prefixed with the ingredient retrieval message
    pub async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        let started = Instant::now();
        let ingredients = self
            .recipes
            .fetch_all_ingredients()
            .await
            .map_err(ingredient_failure)?;

        log_query("list_ingredients", ingredients.len(), started);
        Ok(ingredients)
    }

    /// Recipes whose name contains `name`, ignoring case
    ///
    /// # Errors
    ///
    /// Returns a database error prefixed with the recipe retrieval message
    pub async fn search_recipes_by_name(
        &self,
        name: &str,
    ) -> AppResult<Vec<RecipeWithNutritionDto>> {
        let started = Instant::now();
        let recipes = self
            .recipes
            .search_recipes_by_name(name, self.limits.search_limit)
            .await
            .map_err(recipe_failure)?;

        log_query("search_recipes_by_name", recipes.len(), started);
        Ok(project_recipes(&recipes))
    }

    /// Identities of ingredients whose name contains `name`, ignoring case
    ///
    /// # Errors
    ///
    /// Returns a database error prefixed with the ingredient retrieval message
    pub async fn search_ingredient_ids_by_name(&self, name: &str) -> AppResult<Vec<IngredientId>> {
        let started = Instant::now();
        let ids = self
            .recipes
            .search_ingredient_ids_by_name(name)
            .await
            .map_err(ingredient_failure)?;

        log_query("search_ingredient_ids_by_name", ids.len(), started);
        Ok(ids)
    }

    /// Recipes containing any of `ingredient_ids`, each at most once
    ///
    /// # Errors
    ///
    /// Returns a database error prefixed with the recipe retrieval message
    pub async fn search_recipes_by_ingredient_ids(
        &self,
        ingredient_ids: &[IngredientId],
    ) -> AppResult<Vec<RecipeWithNutritionDto>> {
        let started = Instant::now();
        let recipes = self
            .recipes
            .search_recipes_by_ingredient_ids(ingredient_ids, self.limits.search_limit)
            .await
            .map_err(recipe_failure)?;

        log_query("search_recipes_by_ingredient_ids", recipes.len(), started);
        Ok(project_recipes(&recipes))
    }
}

fn recipe_failure(error: AppError) -> AppError {
    error.with_message_prefix(error_messages::RECIPE_RETRIEVAL_FAILED)
}

fn ingredient_failure(error: AppError) -> AppError {
    error.with_message_prefix(error_messages::INGREDIENT_RETRIEVAL_FAILED)
}

fn log_query(operation: &str, result_count: usize, started: Instant) {
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    AppLogger::log_catalog_query(operation, result_count, duration_ms);
}

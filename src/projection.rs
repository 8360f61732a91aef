// ABOUTME: Single projection from the recipe entity graph to the flattened response DTO
// ABOUTME: Every recipe-returning endpoint goes through project_recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Recipe projection
//!
//! A recipe without a nutrition row projects to zero scalars and a `null`
//! type. Join rows whose ingredient was not loaded are skipped, so a recipe
//! fetched without associations yields an empty (never absent) ingredient list.

use crate::models::{Recipe, RecipeIngredientDto, RecipeWithNutritionDto};

/// Flatten a recipe and its loaded associations
#[must_use]
pub fn project_recipe(recipe: &Recipe) -> RecipeWithNutritionDto {
    let nutrition = recipe.nutrition.as_ref();

    RecipeWithNutritionDto {
        recipe_id: recipe.recipe_id,
        recipe_name: recipe.recipe_name.clone(),
        calories_100g: nutrition.map_or(0.0, |n| n.calories_100g),
        fat_100g: nutrition.map_or(0.0, |n| n.fat_100g),
        sugar_100g: nutrition.map_or(0.0, |n| n.sugar_100g),
        protein_100g: nutrition.map_or(0.0, |n| n.protein_100g),
        nutrition_type: nutrition.and_then(|n| n.nutrition_type.clone()),
        ingredients: recipe
            .recipe_ingredients
            .iter()
            .filter_map(|link| link.ingredient.as_ref())
            .map(|ingredient| RecipeIngredientDto {
                ingredient_id: ingredient.ingredient_id,
                ingredient_name: ingredient.ingredient_name.clone(),
            })
            .collect(),
    }
}

/// Project a batch, preserving order
#[must_use]
pub fn project_recipes(recipes: &[Recipe]) -> Vec<RecipeWithNutritionDto> {
    recipes.iter().map(project_recipe).collect()
}

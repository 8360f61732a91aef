// ABOUTME: Food catalog entity graph and flattened recipe response shape
// ABOUTME: Recipes own an optional Nutrition row and a list of Recipe_Ingredient join rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Recipe identity
pub type RecipeId = i64;

/// Ingredient identity
pub type IngredientId = i64;

bitflags! {
    /// Associations populated alongside a recipe fetch
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RecipeAssociations: u8 {
        /// The one-to-one nutrition row
        const NUTRITION = 0b0000_0001;
        /// Recipe_Ingredient join rows together with their ingredient
        const INGREDIENTS = 0b0000_0010;
        /// Everything a recipe response needs
        const ALL = Self::NUTRITION.bits() | Self::INGREDIENTS.bits();
    }
}

impl Default for RecipeAssociations {
    fn default() -> Self {
        Self::ALL
    }
}

/// Ingredient row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient identity
    pub ingredient_id: IngredientId,
    /// Display name
    pub ingredient_name: String,
}

/// Nutrition facts per 100g, owned by exactly one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    /// Nutrition row identity
    pub nutrition_id: i64,
    /// Owning recipe
    pub recipe_id: RecipeId,
    /// Energy in kcal per 100g
    pub calories_100g: f64,
    /// Fat in grams per 100g
    pub fat_100g: f64,
    /// Sugar in grams per 100g
    pub sugar_100g: f64,
    /// Protein in grams per 100g
    pub protein_100g: f64,
    /// Category label (e.g. "dessert")
    pub nutrition_type: Option<String>,
}

/// Recipe_Ingredient join row
///
/// `ingredient` is `None` unless the ingredient association was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Owning recipe
    pub recipe_id: RecipeId,
    /// Referenced ingredient
    pub ingredient_id: IngredientId,
    /// Loaded ingredient row
    pub ingredient: Option<Ingredient>,
}

/// Recipe entity with its (optionally loaded) associations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe identity
    pub recipe_id: RecipeId,
    /// Display name
    pub recipe_name: String,
    /// Nutrition row, if present and loaded
    pub nutrition: Option<Nutrition>,
    /// Join rows, empty unless loaded
    pub recipe_ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Create a recipe with no associations loaded
    pub fn new(recipe_id: RecipeId, recipe_name: impl Into<String>) -> Self {
        Self {
            recipe_id,
            recipe_name: recipe_name.into(),
            nutrition: None,
            recipe_ingredients: Vec::new(),
        }
    }
}

/// Ingredient entry of a recipe response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredientDto {
    /// Ingredient identity
    pub ingredient_id: IngredientId,
    /// Ingredient name
    pub ingredient_name: String,
}

/// Flattened recipe response with nutrition scalars inlined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeWithNutritionDto {
    /// Recipe identity
    pub recipe_id: RecipeId,
    /// Recipe name
    pub recipe_name: String,
    /// Energy in kcal per 100g (0 without nutrition)
    pub calories_100g: f64,
    /// Fat in grams per 100g (0 without nutrition)
    pub fat_100g: f64,
    /// Sugar in grams per 100g (0 without nutrition)
    pub sugar_100g: f64,
    /// Protein in grams per 100g (0 without nutrition)
    pub protein_100g: f64,
    /// Nutrition category label
    #[serde(rename = "type")]
    pub nutrition_type: Option<String>,
    /// Associated ingredients
    pub ingredients: Vec<RecipeIngredientDto>,
}

// ABOUTME: Core data models for the food catalog and user accounts
// ABOUTME: Recipe, Ingredient, Nutrition, response DTOs, and User types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

/// Catalog entities, association flags, and recipe response DTOs
pub mod catalog;

/// User accounts and their external representation
pub mod user;

pub use catalog::{
    Ingredient, IngredientId, Nutrition, Recipe, RecipeAssociations, RecipeId, RecipeIngredient,
    RecipeIngredientDto, RecipeWithNutritionDto,
};
pub use user::{User, UserDto};

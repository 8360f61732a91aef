// ABOUTME: Tests for the recipe-to-response projection
// ABOUTME: Exercises nutrition inlining, missing associations, and the serialized field names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use pantry_server::models::{
    Ingredient, Nutrition, Recipe, RecipeAssociations, RecipeIngredient, RecipeIngredientDto,
};
use pantry_server::projection::{project_recipe, project_recipes};

fn cake() -> Recipe {
    let mut recipe = Recipe::new(101, "Chocolate Cake");
    recipe.nutrition = Some(Nutrition {
        nutrition_id: 1,
        recipe_id: 101,
        calories_100g: 371.0,
        fat_100g: 15.1,
        sugar_100g: 36.6,
        protein_100g: 5.0,
        nutrition_type: Some("dessert".to_owned()),
    });
    recipe.recipe_ingredients = vec![
        RecipeIngredient {
            recipe_id: 101,
            ingredient_id: 3,
            ingredient: Some(Ingredient {
                ingredient_id: 3,
                ingredient_name: "Chocolate".to_owned(),
            }),
        },
        RecipeIngredient {
            recipe_id: 101,
            ingredient_id: 7,
            ingredient: Some(Ingredient {
                ingredient_id: 7,
                ingredient_name: "Flour".to_owned(),
            }),
        },
    ];
    recipe
}

#[test]
fn test_projection_inlines_nutrition() {
    let dto = project_recipe(&cake());

    assert_eq!(dto.recipe_id, 101);
    assert_eq!(dto.recipe_name, "Chocolate Cake");
    assert!((dto.calories_100g - 371.0).abs() < f64::EPSILON);
    assert!((dto.fat_100g - 15.1).abs() < f64::EPSILON);
    assert!((dto.sugar_100g - 36.6).abs() < f64::EPSILON);
    assert!((dto.protein_100g - 5.0).abs() < f64::EPSILON);
    assert_eq!(dto.nutrition_type.as_deref(), Some("dessert"));
    assert_eq!(
        dto.ingredients,
        vec![
            RecipeIngredientDto {
                ingredient_id: 3,
                ingredient_name: "Chocolate".to_owned(),
            },
            RecipeIngredientDto {
                ingredient_id: 7,
                ingredient_name: "Flour".to_owned(),
            },
        ]
    );
}

#[test]
fn test_missing_nutrition_projects_to_zero_and_null() {
    let dto = project_recipe(&Recipe::new(102, "Plain Rice"));

    assert!(dto.calories_100g.abs() < f64::EPSILON);
    assert!(dto.fat_100g.abs() < f64::EPSILON);
    assert!(dto.sugar_100g.abs() < f64::EPSILON);
    assert!(dto.protein_100g.abs() < f64::EPSILON);
    assert_eq!(dto.nutrition_type, None);
    assert!(dto.ingredients.is_empty());

    let json = serde_json::to_value(&dto).unwrap();
    assert!(json["type"].is_null());
    assert_eq!(json["ingredients"], serde_json::json!([]));
}

#[test]
fn test_unloaded_ingredients_are_skipped() {
    let mut recipe = cake();
    recipe.recipe_ingredients[1].ingredient = None;

    let dto = project_recipe(&recipe);
    assert_eq!(dto.ingredients.len(), 1);
    assert_eq!(dto.ingredients[0].ingredient_name, "Chocolate");
}

#[test]
fn test_serialized_shape_uses_type_key() {
    let json = serde_json::to_value(project_recipe(&cake())).unwrap();
    let object = json.as_object().unwrap();

    for key in [
        "recipe_id",
        "recipe_name",
        "calories_100g",
        "fat_100g",
        "sugar_100g",
        "protein_100g",
        "type",
        "ingredients",
    ] {
        assert!(object.contains_key(key), "missing key {key}");
    }
    assert!(!object.contains_key("nutrition_type"));
    assert_eq!(json["ingredients"][0]["ingredient_name"], "Chocolate");
}

#[tokio::test]
async fn test_project_recipes_preserves_query_order() {
    let recipes = common::create_seeded_database()
        .await
        .recipes()
        .fetch_all(10, RecipeAssociations::ALL)
        .await
        .unwrap();

    let dtos = project_recipes(&recipes);
    let ids: Vec<i64> = dtos.iter().map(|d| d.recipe_id).collect();
    assert_eq!(ids, vec![101, 102, 103, 104, 105]);

    let soup = &dtos[3];
    assert_eq!(soup.nutrition_type, None);
    assert!((soup.calories_100g - 30.0).abs() < f64::EPSILON);
}

// ABOUTME: Route handlers for the food catalog REST API
// ABOUTME: Recipe browsing, name search, ingredient search, and ingredient-set recipe search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Food routes
//!
//! All endpoints are public. Name segments are reduced to their alphabetic
//! characters before they reach the service, so `xyz123` searches for `xyz`.

use crate::{
    constants::error_messages,
    errors::AppError,
    models::IngredientId,
    server::ServerResources,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Food catalog routes
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create all food catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/recipes", get(Self::handle_list_recipes))
            .route("/recipes/preview", get(Self::handle_preview_recipes))
            .route(
                "/recipes/search/by-name/:name",
                get(Self::handle_search_recipes_by_name),
            )
            .route(
                "/recipes/search/by-ingredient-ids",
                post(Self::handle_search_recipes_by_ingredient_ids),
            )
            .route("/ingredients", get(Self::handle_list_ingredients))
            .route(
                "/ingredients/search/by-name/:name",
                get(Self::handle_search_ingredients_by_name),
            )
            .with_state(resources)
    }

    /// Handle GET /recipes
    async fn handle_list_recipes(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let recipes = resources.food.list_recipes().await?;
        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle GET /recipes/preview
    async fn handle_preview_recipes(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let recipes = resources.food.preview_recipes().await?;
        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle GET /ingredients
    async fn handle_list_ingredients(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let ingredients = resources.food.list_ingredients().await?;
        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle GET /recipes/search/by-name/:name
    async fn handle_search_recipes_by_name(
        State(resources): State<Arc<ServerResources>>,
        Path(name): Path<String>,
    ) -> Result<Response, AppError> {
        let name = sanitize_name(&name)?;
        let recipes = resources.food.search_recipes_by_name(&name).await?;
        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle GET /ingredients/search/by-name/:name
    async fn handle_search_ingredients_by_name(
        State(resources): State<Arc<ServerResources>>,
        Path(name): Path<String>,
    ) -> Result<Response, AppError> {
        let name = sanitize_name(&name)?;
        let ids = resources.food.search_ingredient_ids_by_name(&name).await?;
        Ok((StatusCode::OK, Json(ids)).into_response())
    }

    /// Handle POST /recipes/search/by-ingredient-ids
    async fn handle_search_recipes_by_ingredient_ids(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<Vec<IngredientId>>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(ingredient_ids) = body.map_err(|rejection| {
            AppError::invalid_input(format!(
                "Expected a JSON array of ingredient ids: {}",
                rejection.body_text()
            ))
        })?;

        let recipes = resources
            .food
            .search_recipes_by_ingredient_ids(&ingredient_ids)
            .await?;
        Ok((StatusCode::OK, Json(recipes)).into_response())
    }
}

/// Keep only alphabetic characters of a path segment
///
/// Unicode letters survive, so "Crème" stays searchable as written.
///
/// # Errors
///
/// Returns `InvalidInput` when nothing alphabetic remains
pub fn sanitize_name(raw: &str) -> Result<String, AppError> {
    let name: String = raw.chars().filter(|c| c.is_alphabetic()).collect();
    if name.is_empty() {
        return Err(AppError::invalid_input(error_messages::NAME_NOT_ALPHABETIC));
    }
    Ok(name)
}

// ABOUTME: User authentication route handlers for registration, login, and password reset
// ABOUTME: Thin axum handlers delegating to the authentication service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Authentication routes
//!
//! Malformed JSON bodies are answered with the standard error envelope rather
//! than axum's plain-text rejection.

use crate::{
    errors::AppError,
    server::ServerResources,
    services::auth::{ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/login", post(Self::handle_login))
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/forgot-password", post(Self::handle_forgot_password))
            .route("/auth/reset-password", post(Self::handle_reset_password))
            .with_state(resources)
    }

    /// Handle POST /auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let response = resources.auth.login(parse_body(body)?).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<RegisterRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let response = resources.auth.register(parse_body(body)?).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /auth/forgot-password
    async fn handle_forgot_password(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<ForgotPasswordRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let response = resources.auth.forgot_password(parse_body(body)?).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /auth/reset-password
    async fn handle_reset_password(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<ResetPasswordRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let response = resources.auth.reset_password(parse_body(body)?).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

fn parse_body<T: DeserializeOwned>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
    })
}

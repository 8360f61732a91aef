// ABOUTME: HTTP integration tests for registration, login, and password reset
// ABOUTME: Walks the full account lifecycle through the router against an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::Router;
use helpers::axum_test::AxumTestRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use pantry_server::auth::Claims;
use pantry_server::constants::auth::JWT_AUDIENCE;
use pantry_server::server::{build_router, ServerResources};
use serde_json::{json, Value};
use std::sync::Arc;

async fn auth_router() -> (Router, Arc<ServerResources>) {
    let resources = common::create_test_resources(common::create_test_database().await);
    (build_router(Arc::clone(&resources)), resources)
}

async fn register(router: &Router, email: &str, password: &str) -> (u16, Value) {
    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({
            "email": email,
            "user_name": "cook",
            "display_name": "Head Cook",
            "password": password,
        }))
        .send(router.clone())
        .await;
    (response.status(), response.json())
}

async fn login(router: &Router, email: &str, password: &str) -> (u16, Value) {
    let response = AxumTestRequest::post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .send(router.clone())
        .await;
    (response.status(), response.json())
}

async fn forgot(router: &Router, email: &str) -> (u16, Value) {
    let response = AxumTestRequest::post("/auth/forgot-password")
        .json(&json!({ "email": email }))
        .send(router.clone())
        .await;
    (response.status(), response.json())
}

async fn reset(router: &Router, email: &str, token: &str, new_password: &str) -> (u16, Value) {
    let response = AxumTestRequest::post("/auth/reset-password")
        .json(&json!({ "email": email, "token": token, "new_password": new_password }))
        .send(router.clone())
        .await;
    (response.status(), response.json())
}

#[tokio::test]
async fn test_register_then_login() {
    let (router, resources) = auth_router().await;

    let (status, body) = register(&router, "cook@example.com", "password123").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "User registered successfully");
    let user_id = body["user_id"].as_str().unwrap().to_owned();

    let (status, body) = login(&router, "cook@example.com", "password123").await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["id"], user_id.as_str());
    assert_eq!(body["user"]["email"], "cook@example.com");
    assert_eq!(body["user"]["display_name"], "Head Cook");
    assert!(body["user"].get("password_hash").is_none());
    assert!(chrono::DateTime::parse_from_rfc3339(body["expires_at"].as_str().unwrap()).is_ok());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[JWT_AUDIENCE]);
    let claims = decode::<Claims>(
        body["token"].as_str().unwrap(),
        &DecodingKey::from_secret(resources.config.auth.jwt_secret.as_bytes()),
        &validation,
    )
    .unwrap()
    .claims;
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "cook@example.com");
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let (router, _resources) = auth_router().await;
    register(&router, "Cook@Example.com", "password123").await;

    let (status, body) = login(&router, "  COOK@example.COM ", "password123").await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["email"], "cook@example.com");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let (router, _resources) = auth_router().await;

    let (status, body) = register(&router, "not-an-email", "password123").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let (status, _) = register(&router, "cook@example.com", "short").await;
    assert_eq!(status, 400);

    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({ "email": "cook@example.com", "user_name": "  ", "password": "password123" }))
        .send(router.clone())
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let (router, _resources) = auth_router().await;

    let (status, _) = register(&router, "cook@example.com", "password123").await;
    assert_eq!(status, 200);

    let (status, body) = register(&router, "COOK@example.com", "password456").await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let (router, _resources) = auth_router().await;
    register(&router, "cook@example.com", "password123").await;

    let (wrong_password_status, wrong_password) =
        login(&router, "cook@example.com", "password999").await;
    let (unknown_status, unknown) = login(&router, "nobody@example.com", "password123").await;

    assert_eq!(wrong_password_status, 401);
    assert_eq!(unknown_status, 401);
    assert_eq!(wrong_password["error"]["code"], "AUTH_INVALID");
    assert_eq!(wrong_password["error"]["message"], unknown["error"]["message"]);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_input() {
    let (router, _resources) = auth_router().await;

    let response = AxumTestRequest::post("/auth/login")
        .raw_json(r#"{"email": "cook@example.com"}"#)
        .send(router.clone())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let response = AxumTestRequest::post("/auth/register")
        .raw_json("{")
        .send(router)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let (router, _resources) = auth_router().await;
    register(&router, "cook@example.com", "password123").await;

    let (status, body) = forgot(&router, "cook@example.com").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Token generated");
    let token = body["token"].as_str().unwrap().to_owned();
    assert_eq!(token.len(), 48);

    let (status, body) = reset(&router, "cook@example.com", &token, "newpassword456").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Password has been reset successfully");

    let (status, _) = login(&router, "cook@example.com", "password123").await;
    assert_eq!(status, 401);
    let (status, _) = login(&router, "cook@example.com", "newpassword456").await;
    assert_eq!(status, 200);

    // Tokens are single use
    let (status, body) = reset(&router, "cook@example.com", &token, "anotherpass789").await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["code"], "AUTH_INVALID");
}

#[tokio::test]
async fn test_forgot_password_unknown_email_is_404() {
    let (router, _resources) = auth_router().await;

    let (status, body) = forgot(&router, "nobody@example.com").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_reset_password_rejections() {
    let (router, _resources) = auth_router().await;
    register(&router, "cook@example.com", "password123").await;
    register(&router, "baker@example.com", "password123").await;
    let (_, body) = forgot(&router, "cook@example.com").await;
    let token = body["token"].as_str().unwrap().to_owned();

    let (status, _) = reset(&router, "cook@example.com", &token, "short").await;
    assert_eq!(status, 400);

    let (status, _) = reset(&router, "cook@example.com", "wrong-token", "newpassword456").await;
    assert_eq!(status, 401);

    // A token only redeems for the account it was issued to
    let (status, _) = reset(&router, "baker@example.com", &token, "newpassword456").await;
    assert_eq!(status, 401);

    let (status, _) = reset(&router, "nobody@example.com", &token, "newpassword456").await;
    assert_eq!(status, 401);

    // The weak-password and mismatched attempts did not burn the token
    let (status, _) = reset(&router, "cook@example.com", &token, "newpassword456").await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_new_reset_token_retires_previous_one() {
    let (router, _resources) = auth_router().await;
    register(&router, "cook@example.com", "password123").await;

    let (_, first) = forgot(&router, "cook@example.com").await;
    let (_, second) = forgot(&router, "cook@example.com").await;

    let (status, _) = reset(
        &router,
        "cook@example.com",
        first["token"].as_str().unwrap(),
        "newpassword456",
    )
    .await;
    assert_eq!(status, 401);

    let (status, _) = reset(
        &router,
        "cook@example.com",
        second["token"].as_str().unwrap(),
        "newpassword456",
    )
    .await;
    assert_eq!(status, 200);
}

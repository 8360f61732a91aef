// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and database-backed readiness endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Health check routes for service monitoring
//!
//! `/health` answers as long as the process is up. `/ready` also checks that the
//! database answers a trivial query.

use crate::server::ServerResources;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> (StatusCode, Json<serde_json::Value>) {
            let (status, state, database) = match resources.database.ping().await {
                Ok(()) => (StatusCode::OK, "ready", "ok"),
                Err(e) => {
                    tracing::warn!("Readiness check failed: {e}");
                    (StatusCode::SERVICE_UNAVAILABLE, "not_ready", "unavailable")
                }
            };

            (
                status,
                Json(serde_json::json!({
                    "status": state,
                    "database": database,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
        }

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}

// ABOUTME: Route module organization for the Pantry HTTP endpoints
// ABOUTME: Groups route definitions by domain with thin handlers over the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Route module for the Pantry server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Authentication and password reset routes
pub mod auth;
/// Recipe and ingredient catalog routes
pub mod food;
/// Health check and readiness routes
pub mod health;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Food catalog route handlers
pub use food::FoodRoutes;
/// Health route handlers
pub use health::HealthRoutes;

// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Food catalog and user authentication services used by the HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Domain service layer
//!
//! Route handlers stay thin: they extract input, call a service, and serialize
//! the result. Validation, limits, and error shaping live here.

/// Registration, login, and password reset
pub mod auth;

/// Recipe and ingredient lookups with projection
pub mod food;

pub use auth::AuthService;
pub use food::FoodService;

// ABOUTME: Main library entry point for the Pantry food API server
// ABOUTME: Recipe, ingredient, and nutrition lookup over SQLite with user authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

#![deny(unsafe_code)]

//! # Pantry Server
//!
//! An HTTP backend for browsing and searching a recipe catalog, with account
//! registration, login, and password reset.
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` pool, migrations, the recipe query layer, user storage
//!   and the catalog importer
//! - **Projection**: the single recipe to response-DTO mapping
//! - **Services**: catalog and authentication business logic
//! - **Routes**: thin axum handlers per domain
//! - **Server**: shared resources, middleware, and serving
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pantry_server::config::ServerConfig;
//! use pantry_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Pantry server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT issuance, password hashing, and reset token helpers
pub mod auth;
/// Configuration management from environment variables
pub mod config;
/// Application constants and configuration defaults
pub mod constants;
/// `SQLite` pool, migrations, and per-domain managers
pub mod database;
/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;
/// Production logging and structured output
pub mod logging;
/// Catalog and user data models
pub mod models;
/// Recipe entity to response DTO projection
pub mod projection;
/// `HTTP` routes for the food catalog, authentication, and health checks
pub mod routes;
/// Router assembly and HTTP serving
pub mod server;
/// Domain service layer for business logic
pub mod services;

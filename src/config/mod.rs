// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven server, database, auth, and catalog limit configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Configuration module for the Pantry server
//!
//! - **Environment**: Server configuration from environment variables
//! - **Database**: `SQLite` location and pool sizing

/// Environment and server configuration
pub mod environment;

/// Database connection configuration
pub mod database;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{AuthConfig, CatalogLimits, Environment, LogLevel, ServerConfig};

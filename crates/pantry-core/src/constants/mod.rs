// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for catalog limits, auth, routes, and service identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Catalog query limits
pub mod limits {
    /// Cap applied by `GET /recipes`
    pub const RECIPES_FULL_LIMIT: u32 = 4992;
    /// Cap applied by `GET /recipes/preview`
    pub const RECIPES_PREVIEW_LIMIT: u32 = 500;
    /// Cap applied by both recipe search endpoints
    pub const RECIPES_SEARCH_LIMIT: u32 = 50;
    /// Default `SQLite` pool size for file-backed databases
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
}

/// Authentication defaults
pub mod auth {
    /// JWT lifetime in hours
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
    /// Password reset token lifetime in minutes
    pub const DEFAULT_RESET_TOKEN_TTL_MINUTES: i64 = 60;
    /// Length of the raw alphanumeric reset token
    pub const RESET_TOKEN_LENGTH: usize = 48;
    /// Minimum accepted password length
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// JWT audience claim
    pub const JWT_AUDIENCE: &str = "pantry-api";
}

/// Error and status messages returned to clients
pub mod error_messages {
    /// Prefix for infrastructure failures on recipe endpoints
    pub const RECIPE_RETRIEVAL_FAILED: &str = "An error occurred while retrieving recipes: ";
    /// Prefix for infrastructure failures on ingredient endpoints
    pub const INGREDIENT_RETRIEVAL_FAILED: &str =
        "An error occurred while retrieving ingredients: ";
    /// Bad login
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    /// Malformed email on registration
    pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";
    /// Password shorter than the minimum
    pub const PASSWORD_TOO_WEAK: &str = "Password must be at least 8 characters long";
    /// Duplicate registration
    pub const USER_ALREADY_EXISTS: &str = "A user with this email already exists";
    /// Unknown, consumed, or expired reset token
    pub const INVALID_RESET_TOKEN: &str = "Invalid or expired password reset token";
    /// Name path segment without any letters
    pub const NAME_NOT_ALPHABETIC: &str = "Search name must contain alphabetic characters";
}

/// Service names for structured logging
pub mod service_names {
    /// HTTP server
    pub const PANTRY_SERVER: &str = "pantry-server";
}

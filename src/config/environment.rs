// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! Environment-based configuration management for production deployment

use super::database::DatabaseConfig;
use crate::constants::{auth, limits, ports};
use crate::errors::{AppError, AppResult, ErrorCode};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use tracing::{info, warn};

/// Length of the per-process JWT secret generated outside production
const GENERATED_SECRET_LENGTH: usize = 64;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// JWT lifetime in hours
    pub jwt_expiry_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Password reset token lifetime in minutes
    pub reset_token_ttl_minutes: i64,
}

impl AuthConfig {
    /// Configuration with a random secret and the given bcrypt cost
    #[must_use]
    pub fn with_generated_secret(bcrypt_cost: u32) -> Self {
        Self {
            jwt_secret: generate_secret(),
            jwt_expiry_hours: auth::DEFAULT_JWT_EXPIRY_HOURS,
            bcrypt_cost,
            reset_token_ttl_minutes: auth::DEFAULT_RESET_TOKEN_TTL_MINUTES,
        }
    }

    /// Load authentication configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing in production or a numeric value is invalid
    pub fn from_env(environment: Environment) -> AppResult<Self> {
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment.is_production() => {
                return Err(AppError::new(
                    ErrorCode::ConfigMissing,
                    "JWT_SECRET must be set in production",
                ));
            }
            _ => {
                warn!("JWT_SECRET not set; generating a per-process secret (tokens will not survive restarts)");
                generate_secret()
            }
        };

        let bcrypt_cost: u32 = parse_env_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::config_invalid(format!(
                "BCRYPT_COST must be between 4 and 31, got {bcrypt_cost}"
            )));
        }

        Ok(Self {
            jwt_secret,
            jwt_expiry_hours: parse_env_or("JWT_EXPIRY_HOURS", auth::DEFAULT_JWT_EXPIRY_HOURS)?,
            bcrypt_cost,
            reset_token_ttl_minutes: parse_env_or(
                "RESET_TOKEN_TTL_MINUTES",
                auth::DEFAULT_RESET_TOKEN_TTL_MINUTES,
            )?,
        })
    }
}

/// Row caps applied by the catalog endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLimits {
    /// `GET /recipes`
    pub full_limit: u32,
    /// `GET /recipes/preview`
    pub preview_limit: u32,
    /// Both recipe search endpoints
    pub search_limit: u32,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            full_limit: limits::RECIPES_FULL_LIMIT,
            preview_limit: limits::RECIPES_PREVIEW_LIMIT,
            search_limit: limits::RECIPES_SEARCH_LIMIT,
        }
    }
}

impl CatalogLimits {
    /// Load catalog limits from environment
    ///
    /// # Errors
    ///
    /// Returns an error if a limit is not a valid unsigned integer
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            full_limit: parse_env_or("RECIPES_FULL_LIMIT", limits::RECIPES_FULL_LIMIT)?,
            preview_limit: parse_env_or("RECIPES_PREVIEW_LIMIT", limits::RECIPES_PREVIEW_LIMIT)?,
            search_limit: parse_env_or("RECIPES_SEARCH_LIMIT", limits::RECIPES_SEARCH_LIMIT)?,
        })
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Catalog endpoint limits
    pub catalog: CatalogLimits,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is present but invalid
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_owned()),
        );

        Ok(Self {
            http_port: parse_env_or("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
            environment,
            log_level: LogLevel::from_str_or_default(
                &env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned()),
            ),
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env(environment)?,
            catalog: CatalogLimits::from_env()?,
        })
    }

    /// Configuration for tests: in-memory database, low bcrypt cost, default limits
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            http_port: 0,
            environment: Environment::Testing,
            log_level: LogLevel::Debug,
            database: DatabaseConfig::in_memory(),
            auth: AuthConfig::with_generated_secret(4),
            catalog: CatalogLimits::default(),
        }
    }

    /// Get a human-readable configuration summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Pantry Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - Recipe limits: full={} preview={} search={}\n\
             - JWT expiry: {}h\n\
             - Reset token TTL: {}m",
            self.http_port,
            self.environment,
            self.log_level,
            self.database.url,
            self.catalog.full_limit,
            self.catalog.preview_limit,
            self.catalog.search_limit,
            self.auth.jwt_expiry_hours,
            self.auth.reset_token_ttl_minutes,
        )
    }
}

/// Parse an environment variable, falling back to `default` when unset
///
/// # Errors
///
/// Returns `ConfigInvalid` when the variable is set but does not parse
pub(crate) fn parse_env_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{value}': {e}"))),
        Err(_) => Ok(default),
    }
}

fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LENGTH)
        .map(char::from)
        .collect()
}

// ABOUTME: User authentication business logic for registration, login, and password reset
// ABOUTME: Validates credentials, hashes passwords off the async executor, and issues JWTs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

use crate::auth::{self, AuthManager};
use crate::config::AuthConfig;
use crate::constants::{auth::MIN_PASSWORD_LENGTH, error_messages};
use crate::database::UserManager;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{User, UserDto};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// User registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login email
    pub email: String,
    /// Account handle
    pub user_name: String,
    /// Optional display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Plain-text password
    pub password: String,
}

/// User registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// New user ID
    pub user_id: String,
    /// Confirmation message
    pub message: String,
}

/// User login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// User login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed JWT
    pub token: String,
    /// RFC 3339 expiry of `token`
    pub expires_at: String,
    /// Authenticated user
    pub user: UserDto,
}

/// Forgot-password request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Email of the account to reset
    pub email: String,
}

/// Forgot-password response; the raw token is echoed back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    /// Status message
    pub message: String,
    /// One-time reset token
    pub token: String,
}

/// Reset-password request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// Email of the account
    pub email: String,
    /// Token from forgot-password
    pub token: String,
    /// Replacement password
    pub new_password: String,
}

/// Plain message response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Status message
    pub message: String,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    users: UserManager,
    auth_manager: Arc<AuthManager>,
    config: AuthConfig,
}

impl AuthService {
    /// Create a service over the user store and token manager
    #[must_use]
    pub const fn new(users: UserManager, auth_manager: Arc<AuthManager>, config: AuthConfig) -> Self {
        Self {
            users,
            auth_manager,
            config,
        }
    }

    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email, weak password, or empty user
    /// name, `ResourceAlreadyExists` for a taken email, or a database error
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let email = normalize_email(&request.email);
        info!("User registration attempt for email: {email}");

        if !Self::is_valid_email(&email) {
            return Err(AppError::invalid_input(error_messages::INVALID_EMAIL_FORMAT));
        }
        if !Self::is_valid_password(&request.password) {
            return Err(AppError::invalid_input(error_messages::PASSWORD_TOO_WEAK));
        }
        let user_name = request.user_name.trim();
        if user_name.is_empty() {
            return Err(AppError::invalid_input("User name is required"));
        }

        if self.users.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::already_exists(error_messages::USER_ALREADY_EXISTS));
        }

        let password_hash = auth::hash_password(request.password, self.config.bcrypt_cost).await?;
        let display_name = request
            .display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());
        let user = User::new(email.clone(), user_name.to_owned(), display_name, password_hash);

        let user_id = self.users.create_user(&user).await?;
        AppLogger::log_auth_event(&user_id.to_string(), "register", true, None);

        Ok(RegisterResponse {
            user_id: user_id.to_string(),
            message: "User registered successfully".into(),
        })
    }

    /// Handle user login
    ///
    /// Unknown emails and wrong passwords produce the same `AuthInvalid` error.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` on bad credentials, or an internal/database error
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let email = normalize_email(&request.email);
        info!("User login attempt for email: {email}");

        let Some(user) = self.users.get_user_by_email(&email).await? else {
            AppLogger::log_auth_event("unknown", "login", false, Some("unknown email"));
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        };

        let is_valid = auth::verify_password(request.password, user.password_hash.clone()).await?;
        if !is_valid {
            warn!("Invalid password for user: {}", user.id);
            AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("bad password"));
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        }

        let (token, expires_at) = self.auth_manager.generate_token(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

        Ok(LoginResponse {
            token,
            expires_at: expires_at.to_rfc3339(),
            user: UserDto::from(&user),
        })
    }

    /// Issue a one-time password reset token
    ///
    /// Only the SHA-256 digest is stored; the raw token is returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown email, or a database error
    pub async fn forgot_password(
        &self,
        request: ForgotPasswordRequest,
    ) -> AppResult<ForgotPasswordResponse> {
        let email = normalize_email(&request.email);
        let user = self
            .users
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let token = auth::generate_reset_token();
        let expires_at = Utc::now() + Duration::minutes(self.config.reset_token_ttl_minutes);
        self.users
            .store_reset_token(user.id, &auth::hash_reset_token(&token), expires_at)
            .await?;

        AppLogger::log_auth_event(&user.id.to_string(), "forgot_password", true, None);
        Ok(ForgotPasswordResponse {
            message: "Token generated".into(),
            token,
        })
    }

    /// Redeem a reset token and set a new password
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a weak password, `AuthInvalid` when the email or
    /// token does not match a live token, or a database error
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> AppResult<MessageResponse> {
        if !Self::is_valid_password(&request.new_password) {
            return Err(AppError::invalid_input(error_messages::PASSWORD_TOO_WEAK));
        }

        let email = normalize_email(&request.email);
        let Some(user) = self.users.get_user_by_email(&email).await? else {
            return Err(AppError::auth_invalid(error_messages::INVALID_RESET_TOKEN));
        };

        let token_hash = auth::hash_reset_token(request.token.trim());
        if !self.users.is_reset_token_live(user.id, &token_hash).await? {
            AppLogger::log_auth_event(&user.id.to_string(), "reset_password", false, None);
            return Err(AppError::auth_invalid(error_messages::INVALID_RESET_TOKEN));
        }

        let new_hash = auth::hash_password(request.new_password, self.config.bcrypt_cost).await?;
        let redeemed = self
            .users
            .redeem_reset_token(user.id, &token_hash, &new_hash)
            .await?;

        if !redeemed {
            AppLogger::log_auth_event(&user.id.to_string(), "reset_password", false, None);
            return Err(AppError::auth_invalid(error_messages::INVALID_RESET_TOKEN));
        }

        AppLogger::log_auth_event(&user.id.to_string(), "reset_password", true, None);
        Ok(MessageResponse {
            message: "Password has been reset successfully".into(),
        })
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        email[at_pos + 1..].contains('.')
    }

    /// Validate password strength
    #[must_use]
    pub fn is_valid_password(password: &str) -> bool {
        password.chars().count() >= MIN_PASSWORD_LENGTH
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

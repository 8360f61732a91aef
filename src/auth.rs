// ABOUTME: JWT-based user authentication with HS256 signing
// ABOUTME: Token issuance and validation plus password hashing and reset token helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! # Authentication primitives
//!
//! Login issues HS256 JWTs signed with the configured secret; no Pantry
//! endpoint requires one yet. Password hashing and verification run on the
//! blocking pool since bcrypt is CPU-bound.

use crate::config::AuthConfig;
use crate::constants::auth::{JWT_AUDIENCE, RESET_TOKEN_LENGTH};
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// Authentication manager for `JWT` tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager from the auth configuration
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_expiry_hours: config.jwt_expiry_hours,
        }
    }

    /// Generate a `JWT` for a user, returning the token and its expiry
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            aud: JWT_AUDIENCE.to_owned(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))?;
        Ok((token, expires_at))
    }
}

/// Hash a password with bcrypt on the blocking pool
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task panics
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))
}

/// Verify a password against a bcrypt hash on the blocking pool
///
/// # Errors
///
/// Returns an error if the hash is malformed or the blocking task panics
pub async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password verification error: {e}")))
}

/// Generate a random alphanumeric password reset token
#[must_use]
pub fn generate_reset_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Digest of a reset token; only the digest is stored
#[must_use]
pub fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};

    fn decode_with(config: &AuthConfig, token: &str) -> jsonwebtoken::errors::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[JWT_AUDIENCE]);
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }

    fn user() -> User {
        User::new(
            "cook@example.com".to_owned(),
            "cook".to_owned(),
            None,
            String::new(),
        )
    }

    #[test]
    fn test_token_carries_user_claims() {
        let config = AuthConfig::with_generated_secret(4);
        let account = user();
        let (token, expires_at) = AuthManager::new(&config).generate_token(&account).unwrap();
        let claims = decode_with(&config, &token).unwrap();

        assert_eq!(claims.sub, account.id.to_string());
        assert_eq!(claims.email, "cook@example.com");
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_token_is_signed_with_configured_secret() {
        let config = AuthConfig::with_generated_secret(4);
        let (token, _) = AuthManager::new(&config).generate_token(&user()).unwrap();

        let other = AuthConfig::with_generated_secret(4);
        let err = decode_with(&other, &token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn test_expiry_follows_configured_hours() {
        let mut config = AuthConfig::with_generated_secret(4);
        config.jwt_expiry_hours = 2;
        let before = Utc::now();
        let (_, expires_at) = AuthManager::new(&config).generate_token(&user()).unwrap();

        let lifetime = expires_at - before;
        assert!(lifetime >= Duration::hours(2));
        assert!(lifetime < Duration::hours(2) + Duration::minutes(1));
    }

    #[test]
    fn test_reset_token_shape() {
        let token = generate_reset_token();
        assert_eq!(token.len(), RESET_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(hash_reset_token(&token).len(), 64);
        assert_ne!(hash_reset_token(&token), token);
    }

    #[tokio::test]
    async fn test_password_hash_and_verify() {
        let hash = hash_password("correct horse".to_owned(), 4).await.unwrap();
        assert!(verify_password("correct horse".to_owned(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong horse".to_owned(), hash).await.unwrap());
    }
}

// ABOUTME: User management database operations
// ABOUTME: Handles user registration lookups, password updates, and one-time reset tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

impl Database {
    /// Create users and password reset token tables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Table creation fails
    /// - Index creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL COLLATE NOCASE,
                user_name TEXT NOT NULL,
                display_name TEXT,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS password_reset_tokens (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                token_hash TEXT UNIQUE NOT NULL,
                expires_at INTEGER NOT NULL,
                used_at INTEGER,
                created_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_password_reset_tokens_user ON password_reset_tokens(user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// User account and reset token storage
#[derive(Clone)]
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new manager over the shared pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the email is taken (case-insensitively),
    /// or a database error otherwise
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        let result = sqlx::query(
            r"
            INSERT INTO users (id, email, user_name, display_name, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.user_name)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user.id),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::already_exists(format!("User with email {} already exists", user.email)),
            ),
            Err(e) => Err(AppError::database(format!("Failed to create user: {e}"))),
        }
    }

    /// Look up a user by email, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, user_name, display_name, password_hash, created_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Store a hashed reset token, retiring any still-outstanding tokens for the user
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails
    pub async fn store_reset_token(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let now = Utc::now().timestamp();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            "UPDATE password_reset_tokens SET used_at = $2 WHERE user_id = $1 AND used_at IS NULL",
        )
        .bind(user_id.to_string())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to retire reset tokens: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO password_reset_tokens (id, user_id, token_hash, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id.to_string())
        .bind(token_hash)
        .bind(expires_at.timestamp())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to store reset token: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit reset token: {e}")))?;
        Ok(())
    }

    /// Whether the user holds an unused, unexpired reset token with this hash
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn is_reset_token_live(&self, user_id: Uuid, token_hash: &str) -> AppResult<bool> {
        let row = sqlx::query(
            r"
            SELECT 1 FROM password_reset_tokens
            WHERE token_hash = $1 AND user_id = $2 AND used_at IS NULL AND expires_at > $3
            ",
        )
        .bind(token_hash)
        .bind(user_id.to_string())
        .bind(Utc::now().timestamp())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check reset token: {e}")))?;

        Ok(row.is_some())
    }

    /// Redeem a reset token and set the new password hash atomically
    ///
    /// Returns `false` when the token is unknown, belongs to another user, was
    /// already used, or has expired. Nothing is written in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails
    pub async fn redeem_reset_token(
        &self,
        user_id: Uuid,
        token_hash: &str,
        new_password_hash: &str,
    ) -> AppResult<bool> {
        let now = Utc::now().timestamp();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let consumed = sqlx::query(
            r"
            UPDATE password_reset_tokens
            SET used_at = $3
            WHERE token_hash = $1 AND user_id = $2 AND used_at IS NULL AND expires_at > $3
            ",
        )
        .bind(token_hash)
        .bind(user_id.to_string())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to consume reset token: {e}")))?;

        if consumed.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id.to_string())
            .bind(new_password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to update password: {e}")))?;

        sqlx::query(
            "UPDATE password_reset_tokens SET used_at = $2 WHERE user_id = $1 AND used_at IS NULL",
        )
        .bind(user_id.to_string())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to retire reset tokens: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit password reset: {e}")))?;
        Ok(true)
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let invalid = |e: sqlx::Error| AppError::database(format!("Invalid user row: {e}"));

    let id_str: String = row.try_get("id").map_err(invalid)?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| AppError::database(format!("Invalid user id '{id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at").map_err(invalid)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| AppError::database(format!("Invalid user created_at: {e}")))?
        .with_timezone(&Utc);

    Ok(User {
        id,
        email: row.try_get("email").map_err(invalid)?,
        user_name: row.try_get("user_name").map_err(invalid)?,
        display_name: row.try_get("display_name").map_err(invalid)?,
        password_hash: row.try_get("password_hash").map_err(invalid)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::errors::ErrorCode;
    use chrono::Duration;

    async fn manager() -> UserManager {
        Database::new(&DatabaseConfig::in_memory())
            .await
            .unwrap()
            .users()
    }

    fn user(email: &str) -> User {
        User::new(email.to_owned(), "cook".to_owned(), None, "hash".to_owned())
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let users = manager().await;
        let created = user("cook@example.com");
        users.create_user(&created).await.unwrap();

        let fetched = users
            .get_user_by_email("COOK@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let users = manager().await;
        users.create_user(&user("cook@example.com")).await.unwrap();
        let err = users
            .create_user(&user("Cook@Example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    }

    #[tokio::test]
    async fn test_reset_token_is_single_use() {
        let users = manager().await;
        let account = user("cook@example.com");
        users.create_user(&account).await.unwrap();
        users
            .store_reset_token(account.id, "digest", Utc::now() + Duration::hours(1))
            .await
            .unwrap();

        assert!(users
            .redeem_reset_token(account.id, "digest", "new-hash")
            .await
            .unwrap());
        assert!(!users
            .redeem_reset_token(account.id, "digest", "other-hash")
            .await
            .unwrap());

        let stored = users
            .get_user_by_email("cook@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.password_hash, "new-hash");
    }

    #[tokio::test]
    async fn test_expired_reset_token_is_rejected() {
        let users = manager().await;
        let account = user("cook@example.com");
        users.create_user(&account).await.unwrap();
        users
            .store_reset_token(account.id, "digest", Utc::now() - Duration::minutes(1))
            .await
            .unwrap();

        assert!(!users
            .redeem_reset_token(account.id, "digest", "new-hash")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_new_reset_token_retires_previous() {
        let users = manager().await;
        let account = user("cook@example.com");
        users.create_user(&account).await.unwrap();
        let expires = Utc::now() + Duration::hours(1);
        users.store_reset_token(account.id, "first", expires).await.unwrap();
        users.store_reset_token(account.id, "second", expires).await.unwrap();

        assert!(!users
            .redeem_reset_token(account.id, "first", "h")
            .await
            .unwrap());
        assert!(users
            .redeem_reset_token(account.id, "second", "h")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_reset_token_liveness() {
        let users = manager().await;
        let account = user("cook@example.com");
        let other = user("baker@example.com");
        users.create_user(&account).await.unwrap();
        users.create_user(&other).await.unwrap();
        users
            .store_reset_token(account.id, "live", Utc::now() + Duration::hours(1))
            .await
            .unwrap();

        assert!(users.is_reset_token_live(account.id, "live").await.unwrap());
        assert!(!users.is_reset_token_live(other.id, "live").await.unwrap());
        assert!(!users.is_reset_token_live(account.id, "unknown").await.unwrap());

        users
            .redeem_reset_token(account.id, "live", "new-hash")
            .await
            .unwrap();
        assert!(!users.is_reset_token_live(account.id, "live").await.unwrap());

        users
            .store_reset_token(account.id, "stale", Utc::now() - Duration::minutes(1))
            .await
            .unwrap();
        assert!(!users.is_reset_token_live(account.id, "stale").await.unwrap());
    }
}

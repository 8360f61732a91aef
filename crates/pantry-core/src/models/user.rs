// ABOUTME: User account model and its external DTO
// ABOUTME: Bidirectional mapping between the stored user and the client-facing shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,
    /// Login email, unique
    pub email: String,
    /// Account handle
    pub user_name: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh ID
    #[must_use]
    pub fn new(
        email: String,
        user_name: String,
        display_name: Option<String>,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            user_name,
            display_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Client-facing user representation (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    /// Unique user ID
    pub id: Uuid,
    /// Login email
    pub email: String,
    /// Account handle
    pub user_name: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            user_name: user.user_name.clone(),
            display_name: user.display_name.clone(),
            created_at: user.created_at,
        }
    }
}

/// Reverse mapping; the password hash is not part of the DTO and comes back empty.
impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            email: dto.email,
            user_name: dto.user_name,
            display_name: dto.display_name,
            password_hash: String::new(),
            created_at: dto.created_at,
        }
    }
}

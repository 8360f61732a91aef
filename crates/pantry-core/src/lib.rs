// ABOUTME: Core types and constants for the Pantry recipe and ingredient API
// ABOUTME: Foundation crate with error handling, catalog models, user models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

#![deny(unsafe_code)]

//! # Pantry Core
//!
//! Foundation crate providing shared types and constants for the Pantry food API.
//! This crate is designed to change infrequently, enabling incremental compilation
//! benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorResponse`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Catalog entities (recipes, ingredients, nutrition), response DTOs and users

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Core data models (Recipe, Ingredient, Nutrition, User and their DTOs)
pub mod models;

// ABOUTME: Data models re-exported from the pantry-core crate
// ABOUTME: Catalog entities, recipe response DTOs, and user accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! # Data Models

pub use pantry_core::models::*;

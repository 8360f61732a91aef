// ABOUTME: Unified error handling re-exported from the pantry-core crate
// ABOUTME: Standard error codes, AppError, and the HTTP error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! # Unified Error Handling System
//!
//! Error types live in `pantry-core` so the models crate and the server share
//! one taxonomy. This module re-exports them under the familiar path.

pub use pantry_core::errors::*;

// ABOUTME: System-wide constants re-exported from the pantry-core crate
// ABOUTME: Ports, catalog limits, auth defaults, and client-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

//! # Constants Module

pub use pantry_core::constants::*;

// ABOUTME: Support modules shared by the HTTP integration suites
// ABOUTME: Currently just the in-process router driver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
// Each test binary uses a different subset of the helpers
#![allow(dead_code)]

pub mod axum_test;

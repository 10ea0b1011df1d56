// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports deterministic synthetic motion generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod synthetic_motion;

// ABOUTME: Core types and constants for the hand-chicken fitness companion
// ABOUTME: Foundation crate with error handling, data models, thresholds, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Hand-Chicken Core
//!
//! Foundation crate providing shared types for the hand-chicken motion engine
//! and its runtime. This crate is designed to change infrequently so the
//! algorithm crate and the root crate can compile against a stable surface.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ExerciseError`
//! - **constants**: Default thresholds, storage keys, and reward constants
//! - **models**: Samples, motion events, activity states, and calibration labels
//! - **config**: Detection thresholds, engine configuration, and validation

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (samples, motion events, activity states)
pub mod models;

/// Detection thresholds and motion engine configuration
pub mod config;

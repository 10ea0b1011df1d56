// ABOUTME: Configuration management module for the exercise runtime
// ABOUTME: Environment-driven settings layered over the core threshold and engine types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: runtime configuration from environment variables
//! - **Thresholds and engine**: re-exported from `hand_chicken_core::config`

/// Environment and runtime configuration
pub mod environment;

pub use environment::{AppConfig, Environment, LogLevel};
pub use hand_chicken_core::config::{
    ConfigError, DetectionThresholds, MotionEngineConfig, RecommendedThresholds, ThresholdField,
};

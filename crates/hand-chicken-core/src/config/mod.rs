// ABOUTME: Detection threshold and motion engine configuration types
// ABOUTME: Tunable values with defaults, validation, and calibration recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Motion engine constants that are not persisted
pub mod engine;
/// Configuration validation errors
pub mod error;
/// User- and calibration-adjustable detection thresholds
pub mod thresholds;

pub use engine::MotionEngineConfig;
pub use error::ConfigError;
pub use thresholds::{DetectionThresholds, RecommendedThresholds, ThresholdField};

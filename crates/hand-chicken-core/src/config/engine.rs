// ABOUTME: Motion engine configuration for gravity filtering, windowing, and calibration
// ABOUTME: Session-lifetime constants that are not part of the persisted thresholds blob
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigError;
use crate::constants::engine as defaults;
use crate::models::Axis;
use serde::{Deserialize, Serialize};

/// Motion engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotionEngineConfig {
    /// Gravity low-pass smoothing factor, in (0, 1)
    pub gravity_alpha: f64,
    /// Minimum window size for a classification
    pub min_window_samples: usize,
    /// Axis treated as vertical for jump peaks
    pub vertical_axis: Axis,
    /// Length of a calibration run in seconds
    pub calibration_duration_secs: u32,
    /// Spread multiplier for the adaptive calibration peak threshold
    pub calibration_peak_k: f64,
    /// Floor for recommended magnitude thresholds
    pub threshold_floor: f64,
    /// Floor for the recommended cadence band
    pub cadence_floor: f64,
    /// Ceiling for the recommended cadence band
    pub cadence_ceiling: f64,
    /// Buffered motion events between producer and session loop
    pub sample_channel_capacity: usize,
}

impl Default for MotionEngineConfig {
    fn default() -> Self {
        Self {
            gravity_alpha: defaults::GRAVITY_ALPHA,
            min_window_samples: defaults::MIN_WINDOW_SAMPLES,
            vertical_axis: Axis::default(),
            calibration_duration_secs: defaults::CALIBRATION_DURATION_SECS,
            calibration_peak_k: defaults::CALIBRATION_PEAK_K,
            threshold_floor: defaults::THRESHOLD_FLOOR,
            cadence_floor: defaults::CADENCE_FLOOR,
            cadence_ceiling: defaults::CADENCE_CEILING,
            sample_channel_capacity: defaults::SAMPLE_CHANNEL_CAPACITY,
        }
    }
}

impl MotionEngineConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the gravity factor is outside (0, 1), a count is
    /// zero, or the cadence floor exceeds the ceiling
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gravity_alpha > 0.0 && self.gravity_alpha < 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "gravityAlpha must be strictly between 0 and 1",
            ));
        }
        if self.min_window_samples < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "minWindowSamples must be at least 2",
            ));
        }
        if self.calibration_duration_secs == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "calibrationDurationSecs must be > 0",
            ));
        }
        if self.sample_channel_capacity == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "sampleChannelCapacity must be > 0",
            ));
        }
        if !self.calibration_peak_k.is_finite() || !self.threshold_floor.is_finite() {
            return Err(ConfigError::ValueOutOfRange(
                "calibration multipliers must be finite",
            ));
        }
        if self.cadence_floor > self.cadence_ceiling {
            return Err(ConfigError::InvalidRange(
                "cadenceFloor must not exceed cadenceCeiling",
            ));
        }
        Ok(())
    }
}

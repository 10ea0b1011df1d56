// ABOUTME: Detection thresholds shared by step detection, feature extraction, and classification
// ABOUTME: JSON-serializable settings blob with per-field edits and calibration recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigError;
use crate::constants::thresholds as defaults;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tunable detection thresholds.
///
/// Persisted as a camelCase JSON object. Every field has a default, so blobs
/// written by older builds that lack newer fields still load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectionThresholds {
    /// Magnitude delta between consecutive samples that fires a step
    pub step_threshold: f64,
    /// Minimum value for a local maximum to count as a peak
    pub mag_peak_threshold: f64,
    /// Window maximum magnitude required for a jump
    pub jump_amp_threshold: f64,
    /// Required ratio of vertical peaks to magnitude peaks for a jump
    pub vertical_peak_ratio_for_jump: f64,
    /// Lower bound of the walking cadence band (Hz)
    pub cadence_walking_min: f64,
    /// Upper bound of the walking cadence band (Hz)
    pub cadence_walking_max: f64,
    /// Trailing window used for feature computation
    pub window_size_ms: u64,
    /// Classification timer period
    pub feature_compute_interval_ms: u64,
    /// Debounce between accepted steps and between accepted peaks
    pub min_step_interval_ms: u64,
    /// Walking requires `stdMag` below this
    pub walk_std_ceiling: f64,
    /// Walking requires at least this many magnitude peaks
    pub min_peaks_for_walk: u32,
    /// Idle requires `maxMag` below this
    pub idle_max_ceiling: f64,
    /// Idle requires `stdMag` below this
    pub idle_std_ceiling: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            step_threshold: defaults::STEP_THRESHOLD,
            mag_peak_threshold: defaults::MAG_PEAK_THRESHOLD,
            jump_amp_threshold: defaults::JUMP_AMP_THRESHOLD,
            vertical_peak_ratio_for_jump: defaults::VERTICAL_PEAK_RATIO_FOR_JUMP,
            cadence_walking_min: defaults::CADENCE_WALKING_MIN,
            cadence_walking_max: defaults::CADENCE_WALKING_MAX,
            window_size_ms: defaults::WINDOW_SIZE_MS,
            feature_compute_interval_ms: defaults::FEATURE_COMPUTE_INTERVAL_MS,
            min_step_interval_ms: defaults::MIN_STEP_INTERVAL_MS,
            walk_std_ceiling: defaults::WALK_STD_CEILING,
            min_peaks_for_walk: defaults::MIN_PEAKS_FOR_WALK,
            idle_max_ceiling: defaults::IDLE_MAX_CEILING,
            idle_std_ceiling: defaults::IDLE_STD_CEILING,
        }
    }
}

impl DetectionThresholds {
    /// Validate every field
    ///
    /// # Errors
    ///
    /// Returns an error if a magnitude threshold is negative or non-finite,
    /// the cadence band is empty, or a time interval is zero or longer than
    /// [`defaults::MAX_INTERVAL_MS`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            (self.step_threshold, "stepThreshold must be finite and >= 0"),
            (
                self.mag_peak_threshold,
                "magPeakThreshold must be finite and >= 0",
            ),
            (
                self.jump_amp_threshold,
                "jumpAmpThreshold must be finite and >= 0",
            ),
            (
                self.vertical_peak_ratio_for_jump,
                "verticalPeakRatioForJump must be finite and >= 0",
            ),
            (
                self.cadence_walking_min,
                "cadenceWalkingMin must be finite and >= 0",
            ),
            (
                self.cadence_walking_max,
                "cadenceWalkingMax must be finite and >= 0",
            ),
            (self.walk_std_ceiling, "walkStdCeiling must be finite and >= 0"),
            (self.idle_max_ceiling, "idleMaxCeiling must be finite and >= 0"),
            (self.idle_std_ceiling, "idleStdCeiling must be finite and >= 0"),
        ];
        for (value, message) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValueOutOfRange(message));
            }
        }

        if self.cadence_walking_min > self.cadence_walking_max {
            return Err(ConfigError::InvalidRange(
                "cadenceWalkingMin must not exceed cadenceWalkingMax",
            ));
        }
        if self.window_size_ms == 0 {
            return Err(ConfigError::ValueOutOfRange("windowSizeMs must be > 0"));
        }
        if self.feature_compute_interval_ms == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "featureComputeIntervalMs must be > 0",
            ));
        }
        let intervals = [
            (self.window_size_ms, "windowSizeMs must not exceed one day"),
            (
                self.feature_compute_interval_ms,
                "featureComputeIntervalMs must not exceed one day",
            ),
            (
                self.min_step_interval_ms,
                "minStepIntervalMs must not exceed one day",
            ),
        ];
        for (value, message) in intervals {
            if value > defaults::MAX_INTERVAL_MS {
                return Err(ConfigError::ValueOutOfRange(message));
            }
        }
        Ok(())
    }

    /// Read one field as a number
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn get(&self, field: ThresholdField) -> f64 {
        match field {
            ThresholdField::StepThreshold => self.step_threshold,
            ThresholdField::MagPeakThreshold => self.mag_peak_threshold,
            ThresholdField::JumpAmpThreshold => self.jump_amp_threshold,
            ThresholdField::VerticalPeakRatioForJump => self.vertical_peak_ratio_for_jump,
            ThresholdField::CadenceWalkingMin => self.cadence_walking_min,
            ThresholdField::CadenceWalkingMax => self.cadence_walking_max,
            ThresholdField::WindowSizeMs => self.window_size_ms as f64,
            ThresholdField::FeatureComputeIntervalMs => self.feature_compute_interval_ms as f64,
            ThresholdField::MinStepIntervalMs => self.min_step_interval_ms as f64,
            ThresholdField::WalkStdCeiling => self.walk_std_ceiling,
            ThresholdField::MinPeaksForWalk => f64::from(self.min_peaks_for_walk),
            ThresholdField::IdleMaxCeiling => self.idle_max_ceiling,
            ThresholdField::IdleStdCeiling => self.idle_std_ceiling,
        }
    }

    /// Copy with one field replaced, validated as a whole.
    ///
    /// Integer fields are rounded to the nearest whole number.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is non-finite or negative, or if the
    /// resulting thresholds fail [`Self::validate`]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_field(&self, field: ThresholdField, value: f64) -> Result<Self, ConfigError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "threshold values must be finite and >= 0",
            ));
        }

        let mut updated = *self;
        match field {
            ThresholdField::StepThreshold => updated.step_threshold = value,
            ThresholdField::MagPeakThreshold => updated.mag_peak_threshold = value,
            ThresholdField::JumpAmpThreshold => updated.jump_amp_threshold = value,
            ThresholdField::VerticalPeakRatioForJump => {
                updated.vertical_peak_ratio_for_jump = value;
            }
            ThresholdField::CadenceWalkingMin => updated.cadence_walking_min = value,
            ThresholdField::CadenceWalkingMax => updated.cadence_walking_max = value,
            ThresholdField::WindowSizeMs => updated.window_size_ms = value.round() as u64,
            ThresholdField::FeatureComputeIntervalMs => {
                updated.feature_compute_interval_ms = value.round() as u64;
            }
            ThresholdField::MinStepIntervalMs => {
                updated.min_step_interval_ms = value.round() as u64;
            }
            ThresholdField::WalkStdCeiling => updated.walk_std_ceiling = value,
            ThresholdField::MinPeaksForWalk => updated.min_peaks_for_walk = value.round() as u32,
            ThresholdField::IdleMaxCeiling => updated.idle_max_ceiling = value,
            ThresholdField::IdleStdCeiling => updated.idle_std_ceiling = value,
        }
        updated.validate()?;
        Ok(updated)
    }

    /// Copy only the fields present in a calibration recommendation.
    ///
    /// Fields the recommendation leaves out are untouched.
    pub fn apply(&mut self, recommendation: &RecommendedThresholds) {
        if let Some(value) = recommendation.step_threshold {
            self.step_threshold = value;
        }
        if let Some(value) = recommendation.mag_peak_threshold {
            self.mag_peak_threshold = value;
        }
        if let Some(value) = recommendation.jump_amp_threshold {
            self.jump_amp_threshold = value;
        }
        if let Some(value) = recommendation.cadence_walking_min {
            self.cadence_walking_min = value;
        }
        if let Some(value) = recommendation.cadence_walking_max {
            self.cadence_walking_max = value;
        }
    }
}

/// Threshold values derived from a calibration run.
///
/// Only the subset relevant to the calibrated activity is populated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedThresholds {
    /// Recommended step delta threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_threshold: Option<f64>,
    /// Recommended peak threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag_peak_threshold: Option<f64>,
    /// Recommended jump amplitude threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_amp_threshold: Option<f64>,
    /// Recommended lower cadence bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence_walking_min: Option<f64>,
    /// Recommended upper cadence bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence_walking_max: Option<f64>,
}

impl RecommendedThresholds {
    /// Whether the recommendation carries no field at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.step_threshold.is_none()
            && self.mag_peak_threshold.is_none()
            && self.jump_amp_threshold.is_none()
            && self.cadence_walking_min.is_none()
            && self.cadence_walking_max.is_none()
    }
}

/// One editable member of [`DetectionThresholds`], named as in the JSON blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdField {
    /// `stepThreshold`
    StepThreshold,
    /// `magPeakThreshold`
    MagPeakThreshold,
    /// `jumpAmpThreshold`
    JumpAmpThreshold,
    /// `verticalPeakRatioForJump`
    VerticalPeakRatioForJump,
    /// `cadenceWalkingMin`
    CadenceWalkingMin,
    /// `cadenceWalkingMax`
    CadenceWalkingMax,
    /// `windowSizeMs`
    WindowSizeMs,
    /// `featureComputeIntervalMs`
    FeatureComputeIntervalMs,
    /// `minStepIntervalMs`
    MinStepIntervalMs,
    /// `walkStdCeiling`
    WalkStdCeiling,
    /// `minPeaksForWalk`
    MinPeaksForWalk,
    /// `idleMaxCeiling`
    IdleMaxCeiling,
    /// `idleStdCeiling`
    IdleStdCeiling,
}

impl ThresholdField {
    /// All fields in settings-panel order
    pub const ALL: [Self; 13] = [
        Self::StepThreshold,
        Self::MagPeakThreshold,
        Self::JumpAmpThreshold,
        Self::VerticalPeakRatioForJump,
        Self::CadenceWalkingMin,
        Self::CadenceWalkingMax,
        Self::WindowSizeMs,
        Self::FeatureComputeIntervalMs,
        Self::MinStepIntervalMs,
        Self::WalkStdCeiling,
        Self::MinPeaksForWalk,
        Self::IdleMaxCeiling,
        Self::IdleStdCeiling,
    ];

    /// JSON field name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StepThreshold => "stepThreshold",
            Self::MagPeakThreshold => "magPeakThreshold",
            Self::JumpAmpThreshold => "jumpAmpThreshold",
            Self::VerticalPeakRatioForJump => "verticalPeakRatioForJump",
            Self::CadenceWalkingMin => "cadenceWalkingMin",
            Self::CadenceWalkingMax => "cadenceWalkingMax",
            Self::WindowSizeMs => "windowSizeMs",
            Self::FeatureComputeIntervalMs => "featureComputeIntervalMs",
            Self::MinStepIntervalMs => "minStepIntervalMs",
            Self::WalkStdCeiling => "walkStdCeiling",
            Self::MinPeaksForWalk => "minPeaksForWalk",
            Self::IdleMaxCeiling => "idleMaxCeiling",
            Self::IdleStdCeiling => "idleStdCeiling",
        }
    }
}

impl fmt::Display for ThresholdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThresholdField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.name().to_lowercase() == normalized)
            .ok_or_else(|| ConfigError::UnknownField(s.to_owned()))
    }
}

// ABOUTME: Labeled calibration recording with a one-second countdown
// ABOUTME: Derives label-specific threshold recommendations from the whole recording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::features::{compute_features, magnitude_moments, FeatureParams, Features};
use hand_chicken_core::config::{DetectionThresholds, MotionEngineConfig, RecommendedThresholds};
use hand_chicken_core::constants::engine::{
    CADENCE_BAND_HALF_WIDTH, JUMP_AMP_FRACTION, JUMP_PEAK_K, WALK_PEAK_K, WALK_STEP_K,
};
use hand_chicken_core::errors::ExerciseError;
use hand_chicken_core::models::{ActivityLabel, Sample};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One labeled recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationRun {
    /// Activity being recorded
    pub label: ActivityLabel,
    /// Session timestamp at which recording started
    pub started_at: i64,
    /// Planned length in seconds
    pub duration_secs: u32,
    /// Every sample received while recording
    pub samples: Vec<Sample>,
}

impl CalibrationRun {
    /// Start an empty run
    #[must_use]
    pub const fn new(label: ActivityLabel, started_at: i64, duration_secs: u32) -> Self {
        Self {
            label,
            started_at,
            duration_secs,
            samples: Vec::new(),
        }
    }

    /// Summarize the whole recording and derive recommended thresholds.
    ///
    /// Peaks are counted against an adaptive threshold of
    /// `max(floor, mean + std·k)` instead of the live `magPeakThreshold`.
    ///
    /// # Errors
    ///
    /// Returns [`ExerciseError::InsufficientCalibrationData`] when the run
    /// recorded no samples
    pub fn finalize(
        &self,
        thresholds: &DetectionThresholds,
        config: &MotionEngineConfig,
    ) -> Result<CalibrationResult, ExerciseError> {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return Err(ExerciseError::InsufficientCalibrationData);
        };

        let (mean, variance) = magnitude_moments(&self.samples);
        let peak_threshold = config
            .threshold_floor
            .max(variance.sqrt().mul_add(config.calibration_peak_k, mean));
        let params = FeatureParams::live(thresholds, config)
            .with_peak_threshold(peak_threshold)
            .with_min_samples(1);
        let features = compute_features(&self.samples, &params)
            .ok_or(ExerciseError::InsufficientCalibrationData)?;

        Ok(CalibrationResult {
            label: self.label,
            sample_count: self.samples.len(),
            duration_ms: last.timestamp - first.timestamp,
            peak_threshold,
            features,
            recommended: recommend(self.label, &features, config),
        })
    }
}

/// Summary of a finished calibration run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationResult {
    /// Activity that was recorded
    pub label: ActivityLabel,
    /// Samples recorded
    pub sample_count: usize,
    /// Time between first and last sample
    pub duration_ms: i64,
    /// Adaptive peak threshold used for the summary
    pub peak_threshold: f64,
    /// Features over the whole recording
    pub features: Features,
    /// Thresholds relevant to the label
    pub recommended: RecommendedThresholds,
}

/// Derive the thresholds relevant to a label from its recording summary
#[must_use]
pub fn recommend(
    label: ActivityLabel,
    features: &Features,
    config: &MotionEngineConfig,
) -> RecommendedThresholds {
    let floor = config.threshold_floor;
    let (cadence_min, cadence_max) = cadence_band(features.cadence_hz, config);
    match label {
        ActivityLabel::Walking => RecommendedThresholds {
            step_threshold: Some(floor.max(features.std_mag.mul_add(WALK_STEP_K, features.mean_mag))),
            mag_peak_threshold: Some(
                floor.max(features.std_mag.mul_add(WALK_PEAK_K, features.mean_mag)),
            ),
            cadence_walking_min: Some(cadence_min),
            cadence_walking_max: Some(cadence_max),
            jump_amp_threshold: None,
        },
        ActivityLabel::Jumping => RecommendedThresholds {
            jump_amp_threshold: Some(floor.max(features.max_mag * JUMP_AMP_FRACTION)),
            mag_peak_threshold: Some(
                floor.max(features.std_mag.mul_add(JUMP_PEAK_K, features.mean_mag)),
            ),
            ..RecommendedThresholds::default()
        },
    }
}

/// Walking band around a measured cadence, clamped into the configured
/// floor and ceiling while staying ordered
fn cadence_band(cadence_hz: f64, config: &MotionEngineConfig) -> (f64, f64) {
    let max = config
        .cadence_ceiling
        .min(cadence_hz + CADENCE_BAND_HALF_WIDTH)
        .max(config.cadence_floor);
    let min = config
        .cadence_floor
        .max(cadence_hz - CADENCE_BAND_HALF_WIDTH)
        .min(max);
    (min, max)
}

/// Observable calibration state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CalibrationStatus {
    /// Not recording
    #[default]
    Idle,
    /// Recording with a countdown
    #[serde(rename_all = "camelCase")]
    Recording {
        /// Activity being recorded
        label: ActivityLabel,
        /// Whole seconds left on the countdown
        remaining_secs: u32,
    },
}

#[derive(Debug, Clone)]
struct ActiveRun {
    run: CalibrationRun,
    remaining_secs: u32,
}

/// Calibration state machine: `idle -> recording -> idle`
#[derive(Debug, Clone)]
pub struct CalibrationRecorder {
    duration_secs: u32,
    active: Option<ActiveRun>,
    last_result: Option<CalibrationResult>,
}

impl CalibrationRecorder {
    /// Create an idle recorder whose runs last `duration_secs`
    #[must_use]
    pub const fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            active: None,
            last_result: None,
        }
    }

    /// Begin recording a labeled run.
    ///
    /// # Errors
    ///
    /// Returns [`ExerciseError::SessionNotActive`] without a sensor-granting
    /// session and [`ExerciseError::CalibrationAlreadyInProgress`] while a run
    /// is recording. Neither mutates any state.
    pub fn start(
        &mut self,
        label: ActivityLabel,
        started_at: i64,
        session_active: bool,
    ) -> Result<(), ExerciseError> {
        if !session_active {
            return Err(ExerciseError::SessionNotActive);
        }
        if self.active.is_some() {
            return Err(ExerciseError::CalibrationAlreadyInProgress);
        }
        info!(%label, duration_secs = self.duration_secs, "calibration started");
        self.active = Some(ActiveRun {
            run: CalibrationRun::new(label, started_at, self.duration_secs),
            remaining_secs: self.duration_secs,
        });
        Ok(())
    }

    /// Append a sample to the recording, if one is active
    pub fn record(&mut self, sample: Sample) -> bool {
        self.active.as_mut().is_some_and(|active| {
            active.run.samples.push(sample);
            true
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the finalize outcome on the tick that reaches zero and `None`
    /// otherwise. A successful result is kept as [`Self::last_result`].
    pub fn tick(
        &mut self,
        thresholds: &DetectionThresholds,
        config: &MotionEngineConfig,
    ) -> Option<Result<CalibrationResult, ExerciseError>> {
        let active = self.active.as_mut()?;
        active.remaining_secs = active.remaining_secs.saturating_sub(1);
        if active.remaining_secs > 0 {
            debug!(remaining_secs = active.remaining_secs, "calibration countdown");
            return None;
        }

        let finished = self.active.take()?;
        let outcome = finished.run.finalize(thresholds, config);
        match &outcome {
            Ok(result) => {
                info!(
                    label = %result.label,
                    samples = result.sample_count,
                    peaks = result.features.peaks_mag,
                    "calibration finished"
                );
                self.last_result = Some(*result);
            }
            Err(error) => warn!(%error, "calibration produced no recommendation"),
        }
        Some(outcome)
    }

    /// Abandon the active run without finalizing
    pub fn cancel(&mut self) -> Option<CalibrationRun> {
        self.active.take().map(|active| active.run)
    }

    /// Whether a run is recording
    #[must_use]
    pub const fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Current state for display
    #[must_use]
    pub fn status(&self) -> CalibrationStatus {
        self.active
            .as_ref()
            .map_or(CalibrationStatus::Idle, |active| CalibrationStatus::Recording {
                label: active.run.label,
                remaining_secs: active.remaining_secs,
            })
    }

    /// Samples recorded by the active run
    #[must_use]
    pub fn recorded_samples(&self) -> usize {
        self.active.as_ref().map_or(0, |active| active.run.samples.len())
    }

    /// Most recent successful result
    #[must_use]
    pub const fn last_result(&self) -> Option<&CalibrationResult> {
        self.last_result.as_ref()
    }
}

// ABOUTME: Per-session activity engine wiring ingestion, windowing, and classification
// ABOUTME: Feeds the step detector, the live window, and calibration from one sample callback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::calibration::{CalibrationRecorder, CalibrationResult, CalibrationStatus};
use crate::classifier::classify;
use crate::features::{compute_features, FeatureParams, Features};
use crate::gravity::GravitySeparator;
use crate::step_detector::StepDetector;
use crate::window::SlidingWindow;
use hand_chicken_core::config::{DetectionThresholds, MotionEngineConfig};
use hand_chicken_core::errors::ExerciseError;
use hand_chicken_core::models::{ActivityLabel, ActivityState, MotionEvent, Sample};
use tracing::{debug, trace};

/// What one motion event produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestOutcome {
    /// Sample derived from the event
    pub sample: Sample,
    /// Whether the sample completed a step
    pub step_detected: bool,
    /// Whether the sample was also appended to a calibration run
    pub calibrating: bool,
}

/// Motion pipeline for one exercise session.
///
/// Thresholds are passed into every call rather than stored, so edits made
/// while a session runs apply from the next sample or tick onward.
#[derive(Debug, Clone)]
pub struct ActivityEngine {
    config: MotionEngineConfig,
    gravity: GravitySeparator,
    step_detector: StepDetector,
    window: SlidingWindow,
    calibration: CalibrationRecorder,
    activity: ActivityState,
    last_features: Option<Features>,
    sensors_active: bool,
}

impl ActivityEngine {
    /// Create an inactive engine
    #[must_use]
    pub fn new(config: MotionEngineConfig) -> Self {
        Self {
            config,
            gravity: GravitySeparator::new(config.gravity_alpha),
            step_detector: StepDetector::new(),
            window: SlidingWindow::new(),
            calibration: CalibrationRecorder::new(config.calibration_duration_secs),
            activity: ActivityState::Idle,
            last_features: None,
            sensors_active: false,
        }
    }

    /// Engine configuration
    #[must_use]
    pub const fn config(&self) -> &MotionEngineConfig {
        &self.config
    }

    /// Start accepting samples with a fresh pipeline
    pub fn activate(&mut self) {
        *self = Self::new(self.config);
        self.sensors_active = true;
        debug!("motion engine activated");
    }

    /// Stop accepting samples and abandon any calibration run
    pub fn deactivate(&mut self) {
        if self.calibration.cancel().is_some() {
            debug!("calibration cancelled by deactivation");
        }
        self.window.clear();
        self.sensors_active = false;
    }

    /// Whether sensors are granted and samples are accepted
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.sensors_active
    }

    /// Process one motion event in arrival order.
    ///
    /// Returns `None` when the engine is inactive or the event carries no
    /// reading. Otherwise the sample goes to the step detector, the live
    /// window, and the calibration buffer when a run is recording.
    pub fn ingest(
        &mut self,
        event: &MotionEvent,
        timestamp: i64,
        thresholds: &DetectionThresholds,
    ) -> Option<IngestOutcome> {
        if !self.sensors_active {
            return None;
        }
        let linear = self.gravity.linear_acceleration(event)?;
        let sample = Sample::new(timestamp, linear);

        let step_detected = self
            .step_detector
            .on_sample(sample.magnitude, timestamp, thresholds);
        self.window.insert(sample);
        self.window.trim(timestamp, thresholds.window_size_ms);
        let calibrating = self.calibration.record(sample);

        trace!(timestamp, magnitude = sample.magnitude, "sample ingested");
        Some(IngestOutcome {
            sample,
            step_detected,
            calibrating,
        })
    }

    /// Classify the current window.
    ///
    /// Trims the window to `now`, computes features, and stores the result
    /// as the current activity. Too few samples classify as idle.
    pub fn classify_tick(&mut self, now: i64, thresholds: &DetectionThresholds) -> ActivityState {
        let params = FeatureParams::live(thresholds, &self.config);
        let window = self.window.trim(now, thresholds.window_size_ms);
        let features = compute_features(window, &params);
        let activity = classify(features.as_ref(), thresholds);

        if activity != self.activity {
            debug!(from = %self.activity, to = %activity, "activity changed");
        }
        self.activity = activity;
        self.last_features = features;
        activity
    }

    /// Begin a calibration run.
    ///
    /// # Errors
    ///
    /// Fails without side effects when the engine is inactive or a run is
    /// already recording
    pub fn start_calibration(
        &mut self,
        label: ActivityLabel,
        now: i64,
    ) -> Result<(), ExerciseError> {
        self.calibration.start(label, now, self.sensors_active)
    }

    /// Advance the calibration countdown by one second
    pub fn calibration_tick(
        &mut self,
        thresholds: &DetectionThresholds,
    ) -> Option<Result<CalibrationResult, ExerciseError>> {
        self.calibration.tick(thresholds, &self.config)
    }

    /// Current calibration state
    #[must_use]
    pub fn calibration_status(&self) -> CalibrationStatus {
        self.calibration.status()
    }

    /// Most recent successful calibration
    #[must_use]
    pub const fn last_calibration(&self) -> Option<&CalibrationResult> {
        self.calibration.last_result()
    }

    /// Steps counted since activation
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.step_detector.steps()
    }

    /// Activity from the latest classification
    #[must_use]
    pub const fn activity(&self) -> ActivityState {
        self.activity
    }

    /// Features from the latest classification
    #[must_use]
    pub const fn last_features(&self) -> Option<&Features> {
        self.last_features.as_ref()
    }

    /// Samples currently held by the live window
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn active_engine() -> ActivityEngine {
        let mut engine = ActivityEngine::new(MotionEngineConfig::default());
        engine.activate();
        engine
    }

    #[test]
    fn test_inactive_engine_ignores_events() {
        let mut engine = ActivityEngine::new(MotionEngineConfig::default());
        let thresholds = DetectionThresholds::default();
        assert!(engine
            .ingest(&MotionEvent::linear(1.0, 2.0, 3.0), 0, &thresholds)
            .is_none());
        assert_eq!(engine.window_len(), 0);
        assert_eq!(
            engine.start_calibration(ActivityLabel::Walking, 0),
            Err(ExerciseError::SessionNotActive)
        );
    }

    #[test]
    fn test_two_hertz_sine_classifies_as_walking() {
        let mut engine = active_engine();
        let thresholds = DetectionThresholds::default();
        let mut last = 0;
        for i in 0..150 {
            let t = i * 20;
            let phase = 2.0 * PI * 2.0 * (t as f64 / 1000.0);
            let magnitude = 3.0f64.mul_add(phase.sin(), 3.0);
            engine.ingest(&MotionEvent::linear(magnitude, 0.0, 0.0), t, &thresholds);
            last = t;
        }
        assert_eq!(engine.classify_tick(last, &thresholds), ActivityState::Walking);
        let features = engine.last_features().unwrap();
        assert!((features.cadence_hz - 2.0).abs() <= 0.3, "{features:?}");
    }

    #[test]
    fn test_jump_burst_classifies_as_jumping() {
        let mut engine = active_engine();
        let thresholds = DetectionThresholds::default();
        for i in 0..50 {
            let t = i * 20;
            let event = match t {
                200 | 560 => MotionEvent::linear(0.0, 0.0, 15.0),
                920 => MotionEvent::linear(15.0, 0.0, 0.0),
                _ => MotionEvent::linear(0.2, 0.0, 0.0),
            };
            engine.ingest(&event, t, &thresholds);
        }
        assert_eq!(engine.classify_tick(980, &thresholds), ActivityState::Jumping);
        let features = engine.last_features().unwrap();
        assert_eq!(features.peaks_mag, 3);
        assert_eq!(features.peaks_vertical, 2);
    }

    #[test]
    fn test_sparse_window_classifies_as_idle() {
        let mut engine = active_engine();
        let thresholds = DetectionThresholds::default();
        for t in [0, 100, 200] {
            engine.ingest(&MotionEvent::linear(20.0, 0.0, 0.0), t, &thresholds);
        }
        assert_eq!(engine.classify_tick(300, &thresholds), ActivityState::Idle);
        assert!(engine.last_features().is_none());
    }

    #[test]
    fn test_calibration_samples_also_feed_live_window() {
        let mut engine = active_engine();
        let thresholds = DetectionThresholds::default();
        engine.start_calibration(ActivityLabel::Walking, 0).unwrap();
        for i in 0..10 {
            let outcome = engine
                .ingest(&MotionEvent::linear(0.5, 0.0, 0.0), i * 20, &thresholds)
                .unwrap();
            assert!(outcome.calibrating);
        }
        assert_eq!(engine.window_len(), 10);
        assert!(matches!(
            engine.calibration_status(),
            CalibrationStatus::Recording { .. }
        ));
    }

    #[test]
    fn test_deactivate_cancels_calibration() {
        let mut engine = active_engine();
        let thresholds = DetectionThresholds::default();
        engine.start_calibration(ActivityLabel::Jumping, 0).unwrap();
        engine.deactivate();
        assert_eq!(engine.calibration_status(), CalibrationStatus::Idle);
        assert!(engine.calibration_tick(&thresholds).is_none());
        assert!(engine
            .ingest(&MotionEvent::linear(1.0, 0.0, 0.0), 10, &thresholds)
            .is_none());
    }

    #[test]
    fn test_same_events_give_same_state() {
        let thresholds = DetectionThresholds::default();
        let run = || {
            let mut engine = active_engine();
            for i in 0..120 {
                let t = i * 20;
                let z = if i % 17 == 0 { 14.0 } else { 9.81 };
                engine.ingest(&MotionEvent::with_gravity(0.3, 0.1, z), t, &thresholds);
            }
            let activity = engine.classify_tick(2380, &thresholds);
            (activity, engine.steps(), engine.last_features().copied())
        };
        assert_eq!(run(), run());
    }
}

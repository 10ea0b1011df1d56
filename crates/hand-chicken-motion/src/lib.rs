// ABOUTME: Motion classification engine for the hand-chicken exercise session
// ABOUTME: Gravity separation, windowing, step and peak detection, classification, calibration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Hand-Chicken Motion
//!
//! Pure, synchronous algorithms that turn a stream of accelerometer events
//! into an activity state and a step count. Nothing in this crate owns a
//! timer or a thread: the caller supplies timestamps and decides when the
//! classifier runs, which keeps every algorithm deterministic under test.
//!
//! Data flow for one session:
//!
//! ```text
//! MotionEvent ──► GravitySeparator ──► Sample ─┬─► StepDetector
//!                                              ├─► SlidingWindow ──► features ──► classifier
//!                                              └─► CalibrationRecorder (while recording)
//! ```

/// Fixed-duration labeled recording and threshold recommendation
pub mod calibration;
/// Classification rules over extracted features
pub mod classifier;
/// Per-session engine wiring all stages together
pub mod engine;
/// Feature extraction over a window of samples
pub mod features;
/// Low-pass gravity estimate and linear acceleration
pub mod gravity;
/// Debounced strict local-maximum counter
pub mod peaks;
/// Delta-threshold step detector
pub mod step_detector;
/// Time-bounded trailing sample buffer
pub mod window;

pub use calibration::{CalibrationRecorder, CalibrationResult, CalibrationRun, CalibrationStatus};
pub use classifier::classify;
pub use engine::{ActivityEngine, IngestOutcome};
pub use features::{compute_features, FeatureParams, Features};
pub use gravity::GravitySeparator;
pub use peaks::count_peaks;
pub use step_detector::StepDetector;
pub use window::SlidingWindow;

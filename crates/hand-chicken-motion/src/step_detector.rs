// ABOUTME: Stateful delta-threshold step detector over the magnitude stream
// ABOUTME: Debounced by a minimum interval and tolerant of threshold edits mid-session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hand_chicken_core::config::DetectionThresholds;
use tracing::trace;

/// Counts steps from consecutive magnitude deltas.
///
/// A step fires when `|magnitude − last| > stepThreshold` and more than
/// `minStepIntervalMs` has passed since the previous step. The previous
/// magnitude is replaced on every sample whether or not a step fires.
#[derive(Debug, Clone, Default)]
pub struct StepDetector {
    last_magnitude: f64,
    last_step_timestamp: Option<i64>,
    steps: u64,
}

impl StepDetector {
    /// Create a detector with no history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one magnitude and report whether it completed a step.
    ///
    /// A zero previous magnitude is treated as "no history" and replaced by
    /// the current one, so the first sample of a session never fires.
    pub fn on_sample(
        &mut self,
        magnitude: f64,
        timestamp: i64,
        thresholds: &DetectionThresholds,
    ) -> bool {
        let last = if self.last_magnitude == 0.0 {
            magnitude
        } else {
            self.last_magnitude
        };
        let delta = (magnitude - last).abs();
        self.last_magnitude = magnitude;

        let min_interval = i64::try_from(thresholds.min_step_interval_ms).unwrap_or(i64::MAX);
        let debounced = self
            .last_step_timestamp
            .map_or(true, |previous| timestamp.saturating_sub(previous) > min_interval);
        if delta > thresholds.step_threshold && debounced {
            self.steps += 1;
            self.last_step_timestamp = Some(timestamp);
            trace!(steps = self.steps, delta, timestamp, "step detected");
            return true;
        }
        false
    }

    /// Steps counted so far
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Timestamp of the most recent step
    #[must_use]
    pub const fn last_step_timestamp(&self) -> Option<i64> {
        self.last_step_timestamp
    }

    /// Forget all history and zero the counter
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

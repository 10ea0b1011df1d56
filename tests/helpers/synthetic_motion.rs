// ABOUTME: Synthetic accelerometer data generator for motion engine tests
// ABOUTME: Seeded walking traces, jittered random samples, and arbitrary feature summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use hand_chicken::models::{MotionEvent, MotionVector, Sample};
use hand_chicken::motion::Features;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

/// Sampling period of the motion sensor at 50 Hz
pub const SAMPLE_PERIOD_MS: i64 = 20;

/// Deterministic generator of motion data.
///
/// The same seed always yields the same samples, so failures reproduce.
#[derive(Debug, Clone)]
pub struct SyntheticMotion {
    rng: ChaCha8Rng,
}

impl SyntheticMotion {
    /// Create a generator with a fixed seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Strictly increasing timestamps starting at zero
    pub fn jittered_timestamps(&mut self, count: usize, min_gap_ms: i64, max_gap_ms: i64) -> Vec<i64> {
        let mut t = 0;
        (0..count)
            .map(|_| {
                let current = t;
                t += self.rng.gen_range(min_gap_ms..=max_gap_ms);
                current
            })
            .collect()
    }

    /// Samples with every axis uniform in `[-limit, limit]` at jittered times
    pub fn random_samples(&mut self, count: usize, limit: f64) -> Vec<Sample> {
        let timestamps = self.jittered_timestamps(count, 5, 60);
        timestamps
            .into_iter()
            .map(|t| {
                let linear = MotionVector::new(
                    self.rng.gen_range(-limit..=limit),
                    self.rng.gen_range(-limit..=limit),
                    self.rng.gen_range(-limit..=limit),
                );
                Sample::new(t, linear)
            })
            .collect()
    }

    /// Walking-like trace at 50 Hz: a sine magnitude with uniform noise
    pub fn walking(&mut self, duration_ms: i64, cadence_hz: f64, amplitude: f64, noise: f64) -> Vec<Sample> {
        (0..duration_ms / SAMPLE_PERIOD_MS)
            .map(|i| {
                let t = i * SAMPLE_PERIOD_MS;
                let phase = 2.0 * PI * cadence_hz * (t as f64 / 1000.0);
                let jitter = if noise > 0.0 {
                    self.rng.gen_range(-noise..=noise)
                } else {
                    0.0
                };
                let magnitude = amplitude.mul_add(phase.sin(), amplitude) + jitter;
                Sample::new(t, MotionVector::new(magnitude.max(0.0), 0.0, 0.0))
            })
            .collect()
    }

    /// Arbitrary but internally consistent feature summary
    pub fn random_features(&mut self) -> Features {
        let sample_count = self.rng.gen_range(5..200);
        let window_sec = self.rng.gen_range(0.1..=2.0);
        let var_mag: f64 = self.rng.gen_range(0.0..=40.0);
        let peaks_mag = self.rng.gen_range(0..12);
        Features {
            sample_count,
            mean_mag: self.rng.gen_range(0.0..=10.0),
            var_mag,
            std_mag: var_mag.sqrt(),
            max_mag: self.rng.gen_range(0.0..=25.0),
            peaks_mag,
            peaks_vertical: self.rng.gen_range(0..=peaks_mag),
            window_sec,
            cadence_hz: f64::from(peaks_mag) / window_sec,
        }
    }
}

/// Platform event carrying a sample's linear acceleration
#[must_use]
pub fn to_event(sample: &Sample) -> MotionEvent {
    MotionEvent::linear(sample.lin_ax, sample.lin_ay, sample.lin_az)
}

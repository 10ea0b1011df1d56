// ABOUTME: Statistical features over a window of samples
// ABOUTME: Mean, spread, maximum, peak counts on two channels, and cadence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::peaks::count_peaks;
use hand_chicken_core::config::{DetectionThresholds, MotionEngineConfig};
use hand_chicken_core::constants::engine::MIN_WINDOW_SECONDS;
use hand_chicken_core::models::{Axis, Sample};
use serde::{Deserialize, Serialize};

/// Feature summary of one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    /// Samples the summary was computed from
    pub sample_count: usize,
    /// Mean magnitude
    pub mean_mag: f64,
    /// Sample variance of magnitude
    pub var_mag: f64,
    /// Sample standard deviation of magnitude
    pub std_mag: f64,
    /// Largest magnitude
    pub max_mag: f64,
    /// Debounced peaks on the magnitude channel
    pub peaks_mag: u32,
    /// Debounced peaks on the vertical-axis channel
    pub peaks_vertical: u32,
    /// Time span covered, in seconds
    pub window_sec: f64,
    /// Magnitude peaks per second
    pub cadence_hz: f64,
}

impl Features {
    /// Vertical peaks relative to magnitude peaks, with the divisor floored at one
    #[must_use]
    pub fn vertical_peak_ratio(&self) -> f64 {
        f64::from(self.peaks_vertical) / f64::from(self.peaks_mag.max(1))
    }
}

/// Parameters for one feature computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureParams {
    /// Minimum value for a local maximum to count as a peak
    pub peak_threshold: f64,
    /// Debounce between accepted peaks
    pub min_peak_interval_ms: u64,
    /// Fewer samples than this produce no features
    pub min_samples: usize,
    /// Channel used for vertical peaks
    pub vertical_axis: Axis,
}

impl FeatureParams {
    /// Parameters for the live trailing window
    #[must_use]
    pub const fn live(thresholds: &DetectionThresholds, config: &MotionEngineConfig) -> Self {
        Self {
            peak_threshold: thresholds.mag_peak_threshold,
            min_peak_interval_ms: thresholds.min_step_interval_ms,
            min_samples: config.min_window_samples,
            vertical_axis: config.vertical_axis,
        }
    }

    /// Same parameters with a different peak threshold
    #[must_use]
    pub const fn with_peak_threshold(mut self, peak_threshold: f64) -> Self {
        self.peak_threshold = peak_threshold;
        self
    }

    /// Same parameters with a different minimum sample count
    #[must_use]
    pub const fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }
}

/// Mean and Bessel-corrected variance of the magnitude channel
#[allow(clippy::cast_precision_loss)]
pub(crate) fn magnitude_moments(samples: &[Sample]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let n = samples.len() as f64;
    let mean = samples.iter().map(|s| s.magnitude).sum::<f64>() / n;
    let squared: f64 = samples
        .iter()
        .map(|s| (s.magnitude - mean) * (s.magnitude - mean))
        .sum();
    let variance = squared / (n - 1.0).max(1.0);
    (mean, variance)
}

/// Compute features over a time-ordered window.
///
/// Returns `None` when the window holds fewer than `params.min_samples`
/// samples or none at all. That is a defined no-op, not an error: the
/// classifier maps it to idle.
#[allow(clippy::cast_precision_loss)]
pub fn compute_features(window: &[Sample], params: &FeatureParams) -> Option<Features> {
    let (first, last) = (window.first()?, window.last()?);
    if window.len() < params.min_samples {
        return None;
    }

    let (mean_mag, var_mag) = magnitude_moments(window);
    let max_mag = window
        .iter()
        .map(|s| s.magnitude)
        .fold(f64::NEG_INFINITY, f64::max);

    let peaks_mag = count_peaks(
        window,
        |s| s.magnitude,
        params.peak_threshold,
        params.min_peak_interval_ms,
    );
    let axis = params.vertical_axis;
    let peaks_vertical = count_peaks(
        window,
        |s| s.axis_magnitude(axis),
        params.peak_threshold,
        params.min_peak_interval_ms,
    );

    let window_sec = ((last.timestamp - first.timestamp) as f64 / 1000.0).max(MIN_WINDOW_SECONDS);

    Some(Features {
        sample_count: window.len(),
        mean_mag,
        var_mag,
        std_mag: var_mag.sqrt(),
        max_mag,
        peaks_mag,
        peaks_vertical,
        window_sec,
        cadence_hz: f64::from(peaks_mag) / window_sec,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_chicken_core::models::MotionVector;
    use std::f64::consts::PI;

    fn params() -> FeatureParams {
        FeatureParams::live(
            &DetectionThresholds::default(),
            &MotionEngineConfig::default(),
        )
    }

    #[test]
    fn test_too_few_samples_yield_nothing() {
        let window: Vec<Sample> = (0..4)
            .map(|i| Sample::new(i * 20, MotionVector::new(1.0, 0.0, 0.0)))
            .collect();
        assert!(compute_features(&window, &params()).is_none());
        assert!(compute_features(&[], &params().with_min_samples(0)).is_none());
    }

    #[test]
    fn test_constant_magnitude_has_no_spread_and_no_peaks() {
        let window: Vec<Sample> = (0..20)
            .map(|i| Sample::new(i * 100, MotionVector::new(0.0, 0.5, 0.0)))
            .collect();
        let features = compute_features(&window, &params()).unwrap();
        assert!(features.std_mag.abs() < f64::EPSILON);
        assert_eq!(features.peaks_mag, 0);
        assert!((features.mean_mag - 0.5).abs() < 1e-12);
        assert!((features.window_sec - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_variance_uses_sample_denominator() {
        let window: Vec<Sample> = [1.0, 2.0, 3.0, 4.0, 5.0]
            .iter()
            .enumerate()
            .map(|(i, &m)| Sample::new(i as i64 * 10, MotionVector::new(m, 0.0, 0.0)))
            .collect();
        let features = compute_features(&window, &params()).unwrap();
        assert!((features.var_mag - 2.5).abs() < 1e-12);
        assert!((features.max_mag - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sine_at_two_hertz_has_walking_cadence() {
        let window: Vec<Sample> = (0..150)
            .map(|i| {
                let t = i * 20;
                let phase = 2.0 * PI * 2.0 * (t as f64 / 1000.0);
                let magnitude = 3.0f64.mul_add(phase.sin(), 3.0);
                Sample::new(t, MotionVector::new(magnitude, 0.0, 0.0))
            })
            .collect();
        let features = compute_features(&window, &params()).unwrap();
        assert!((5..=7).contains(&features.peaks_mag), "{features:?}");
        assert!((features.cadence_hz - 2.0).abs() <= 0.3, "{features:?}");
        assert_eq!(features.peaks_vertical, 0);
    }

    #[test]
    fn test_vertical_channel_follows_configured_axis() {
        let mut window = Vec::new();
        for i in 0..10 {
            let t = i * 200;
            let spike = if i % 3 == 1 { 4.0 } else { 0.1 };
            window.push(Sample::new(t, MotionVector::new(0.0, spike, 0.0)));
        }
        let z = compute_features(&window, &params()).unwrap();
        assert_eq!(z.peaks_vertical, 0);

        let mut y_params = params();
        y_params.vertical_axis = Axis::Y;
        let y = compute_features(&window, &y_params).unwrap();
        assert_eq!(y.peaks_vertical, y.peaks_mag);
        assert_eq!(y.peaks_mag, 3);
    }
}

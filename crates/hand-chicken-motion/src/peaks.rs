// ABOUTME: Strict single-pass local-maximum counter with a time debounce
// ABOUTME: Used for both the magnitude channel and the vertical-axis channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hand_chicken_core::models::Sample;

/// Count debounced peaks in a time-ordered series.
///
/// Interior index `i` is a peak iff `v[i] > v[i-1]`, `v[i] > v[i+1]`,
/// `v[i] > threshold` and more than `min_interval_ms` has elapsed since the
/// last accepted peak. Equal neighbors never form a peak. The first accepted
/// peak has no predecessor and is never debounced.
pub fn count_peaks<F>(samples: &[Sample], value: F, threshold: f64, min_interval_ms: u64) -> u32
where
    F: Fn(&Sample) -> f64,
{
    let min_interval = i64::try_from(min_interval_ms).unwrap_or(i64::MAX);
    let mut last_peak: Option<i64> = None;
    let mut peaks = 0;

    for triple in samples.windows(3) {
        let [prev, current, next] = triple else {
            continue;
        };
        let v = value(current);
        if v <= value(prev) || v <= value(next) || v <= threshold {
            continue;
        }
        if last_peak.is_some_and(|t| current.timestamp.saturating_sub(t) <= min_interval) {
            continue;
        }
        last_peak = Some(current.timestamp);
        peaks += 1;
    }
    peaks
}

// ABOUTME: Rule-based activity classifier over window features
// ABOUTME: Evaluates jumping, then walking, then idle, and falls back to unknown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::features::Features;
use hand_chicken_core::config::DetectionThresholds;
use hand_chicken_core::models::ActivityState;

/// Magnitude peaks a window needs before it can be a jump
const MIN_PEAKS_FOR_JUMP: u32 = 2;

/// Map window features to an activity state.
///
/// Missing features mean the window was too small, which always reads as
/// idle. Rules are checked in order and the first match wins.
#[must_use]
pub fn classify(features: Option<&Features>, thresholds: &DetectionThresholds) -> ActivityState {
    let Some(f) = features else {
        return ActivityState::Idle;
    };

    if is_jumping(f, thresholds) {
        ActivityState::Jumping
    } else if is_walking(f, thresholds) {
        ActivityState::Walking
    } else if f.max_mag < thresholds.idle_max_ceiling && f.std_mag < thresholds.idle_std_ceiling {
        ActivityState::Idle
    } else {
        ActivityState::Unknown
    }
}

fn is_jumping(f: &Features, thresholds: &DetectionThresholds) -> bool {
    f.max_mag > thresholds.jump_amp_threshold
        && f.peaks_mag >= MIN_PEAKS_FOR_JUMP
        && f.vertical_peak_ratio() >= thresholds.vertical_peak_ratio_for_jump
}

fn is_walking(f: &Features, thresholds: &DetectionThresholds) -> bool {
    (thresholds.cadence_walking_min..=thresholds.cadence_walking_max).contains(&f.cadence_hz)
        && f.std_mag < thresholds.walk_std_ceiling
        && f.peaks_mag >= thresholds.min_peaks_for_walk
}

// ABOUTME: Output formatting helpers for hand-chicken-cli
// ABOUTME: Consistent display of thresholds, replay timelines, and calibration results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::trace::ReplayReport;
use hand_chicken::config::{DetectionThresholds, ThresholdField};
use hand_chicken::motion::CalibrationResult;

/// Print every threshold, one per line
pub fn display_thresholds(thresholds: &DetectionThresholds) {
    println!("Detection thresholds:");
    for field in ThresholdField::ALL {
        println!("   {:<26} {}", field.name(), thresholds.get(field));
    }
}

/// Print the activity timeline of a replay
pub fn display_replay(report: &ReplayReport) {
    println!("Replayed {} events", report.events);
    println!("Steps: {}", report.steps);
    println!("{}", "=".repeat(40));
    for entry in &report.timeline {
        println!("{:>8} ms  {}", entry.t, entry.activity);
    }
}

/// Print a calibration summary and its recommendation
pub fn display_calibration(result: &CalibrationResult) {
    let features = &result.features;
    println!("Calibration ({}) finished", result.label);
    println!("{}", "=".repeat(40));
    println!("   samples        {}", result.sample_count);
    println!("   duration       {} ms", result.duration_ms);
    println!("   peak threshold {:.3}", result.peak_threshold);
    println!("   mean / std     {:.3} / {:.3}", features.mean_mag, features.std_mag);
    println!("   max            {:.3}", features.max_mag);
    println!(
        "   peaks          {} ({} vertical)",
        features.peaks_mag, features.peaks_vertical
    );
    println!("   cadence        {:.2} Hz", features.cadence_hz);

    println!("\nRecommended:");
    let recommended = &result.recommended;
    let fields = [
        (ThresholdField::StepThreshold, recommended.step_threshold),
        (ThresholdField::MagPeakThreshold, recommended.mag_peak_threshold),
        (ThresholdField::JumpAmpThreshold, recommended.jump_amp_threshold),
        (ThresholdField::CadenceWalkingMin, recommended.cadence_walking_min),
        (ThresholdField::CadenceWalkingMax, recommended.cadence_walking_max),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            println!("   {:<26} {value:.3}", field.name());
        }
    }
}

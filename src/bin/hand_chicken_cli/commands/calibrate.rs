// ABOUTME: Calibration command for hand-chicken-cli
// ABOUTME: Derives recommended thresholds from a labeled trace, optionally applying and saving them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hand_chicken::config::MotionEngineConfig;
use hand_chicken::errors::AppResult;
use hand_chicken::models::ActivityLabel;
use hand_chicken::motion::ActivityEngine;
use hand_chicken::storage::{KeyValueStore, ThresholdHandle, ThresholdRepository};
use std::path::Path;
use tracing::info;

use crate::helpers::display::{display_calibration, display_thresholds};
use crate::helpers::trace::{calibrate, load_trace};

/// Options for one calibration run
pub struct CalibrateOptions<'a> {
    /// Activity recorded in the trace
    pub label: ActivityLabel,
    /// Trace file
    pub trace: &'a Path,
    /// Copy the recommendation into the thresholds
    pub apply: bool,
    /// Persist the applied thresholds
    pub save: bool,
}

/// Calibrate from a trace
pub async fn run<S: KeyValueStore>(
    options: CalibrateOptions<'_>,
    repository: &ThresholdRepository<S>,
    engine_config: MotionEngineConfig,
) -> AppResult<()> {
    let events = load_trace(options.trace).await?;
    let handle = ThresholdHandle::new(repository.load().await);

    let mut engine = ActivityEngine::new(engine_config);
    let result = calibrate(&mut engine, &events, options.label, &handle.current())?;
    display_calibration(&result);

    if !options.apply {
        return Ok(());
    }
    let applied = handle.apply_recommendation(&result.recommended)?;
    println!();
    display_thresholds(&applied);

    if options.save {
        repository.save(&applied).await?;
        info!(label = %options.label, "calibrated thresholds saved");
        println!("\nSaved.");
    }
    Ok(())
}

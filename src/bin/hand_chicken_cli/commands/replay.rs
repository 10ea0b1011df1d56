// ABOUTME: Replay command for hand-chicken-cli
// ABOUTME: Classifies a recorded motion trace with the persisted thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hand_chicken::config::{DetectionThresholds, MotionEngineConfig};
use hand_chicken::errors::AppResult;
use hand_chicken::motion::ActivityEngine;
use std::path::Path;
use tracing::info;

use crate::helpers::display::display_replay;
use crate::helpers::trace::{load_trace, replay};

/// Replay a trace and print the activity timeline
pub async fn run(
    trace: &Path,
    thresholds: &DetectionThresholds,
    engine_config: MotionEngineConfig,
    json: bool,
) -> AppResult<()> {
    let events = load_trace(trace).await?;
    info!(events = events.len(), trace = %trace.display(), "replaying trace");

    let mut engine = ActivityEngine::new(engine_config);
    let report = replay(&mut engine, &events, thresholds);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_replay(&report);
    }
    Ok(())
}

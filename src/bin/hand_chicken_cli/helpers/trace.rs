// ABOUTME: Recorded motion trace loading and offline replay through the activity engine
// ABOUTME: Drives classification and calibration ticks from trace time instead of wall-clock timers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hand_chicken::config::DetectionThresholds;
use hand_chicken::errors::{AppError, AppResult, ExerciseError};
use hand_chicken::models::{ActivityLabel, ActivityState, MotionEvent};
use hand_chicken::motion::{ActivityEngine, CalibrationResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

const CALIBRATION_TICK_MS: i64 = 1000;

/// One recorded motion event
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TraceEvent {
    /// Milliseconds since the start of the recording
    pub t: i64,
    /// Platform readings
    #[serde(flatten)]
    pub event: MotionEvent,
}

/// Read a JSON array of trace events, sorted by time
pub async fn load_trace(path: &Path) -> AppResult<Vec<TraceEvent>> {
    let raw = fs::read_to_string(path).await?;
    let mut events: Vec<TraceEvent> = serde_json::from_str(&raw).map_err(|e| {
        AppError::invalid_input(format!("{} is not a motion trace: {e}", path.display()))
    })?;
    if events.is_empty() {
        return Err(AppError::invalid_input(format!(
            "{} contains no motion events",
            path.display()
        )));
    }
    events.sort_by_key(|event| event.t);
    Ok(events)
}

/// Activity change observed during a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Trace time of the classification tick
    pub t: i64,
    /// Activity from that tick on
    pub activity: ActivityState,
}

/// Outcome of replaying a trace
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Events fed to the engine
    pub events: usize,
    /// Steps counted
    pub steps: u64,
    /// Activity changes, starting from the first tick
    pub timeline: Vec<TimelineEntry>,
}

/// Feed a trace through a fresh engine, classifying every
/// `featureComputeIntervalMs` of trace time.
///
/// Once the window has drained during a gap in the trace, every further tick
/// until the next event classifies an empty window, so the replay jumps to
/// the last tick before that event instead of visiting each one.
pub fn replay(
    engine: &mut ActivityEngine,
    events: &[TraceEvent],
    thresholds: &DetectionThresholds,
) -> ReplayReport {
    engine.activate();
    let interval = i64::try_from(thresholds.feature_compute_interval_ms)
        .unwrap_or(i64::MAX)
        .max(1);
    let window = i64::try_from(thresholds.window_size_ms).unwrap_or(i64::MAX);
    let start = events.first().map_or(0, |event| event.t);
    let mut next_tick = start.saturating_add(interval);
    let mut drained_at = start.saturating_add(window);
    let mut timeline: Vec<TimelineEntry> = Vec::new();

    let mut record = |t: i64, activity: ActivityState| {
        if timeline.last().map(|entry| entry.activity) != Some(activity) {
            timeline.push(TimelineEntry { t, activity });
        }
    };

    for event in events {
        while event.t >= next_tick {
            record(next_tick, engine.classify_tick(next_tick, thresholds));
            let skipped = if next_tick >= drained_at {
                (event.t - next_tick) / interval
            } else {
                0
            };
            next_tick = next_tick.saturating_add(interval.saturating_mul(skipped.max(1)));
        }
        engine.ingest(&event.event, event.t, thresholds);
        drained_at = event.t.saturating_add(window);
    }
    if let Some(last) = events.last() {
        record(last.t, engine.classify_tick(last.t, thresholds));
    }

    ReplayReport {
        events: events.len(),
        steps: engine.steps(),
        timeline,
    }
}

/// Record a labeled calibration run from a trace.
///
/// The countdown advances once per second of trace time; events after the
/// run ends are ignored.
pub fn calibrate(
    engine: &mut ActivityEngine,
    events: &[TraceEvent],
    label: ActivityLabel,
    thresholds: &DetectionThresholds,
) -> Result<CalibrationResult, ExerciseError> {
    engine.activate();
    let start = events.first().map_or(0, |event| event.t);
    engine.start_calibration(label, start)?;
    let mut next_tick = start.saturating_add(CALIBRATION_TICK_MS);

    for event in events {
        while event.t >= next_tick {
            if let Some(outcome) = engine.calibration_tick(thresholds) {
                return outcome;
            }
            next_tick = next_tick.saturating_add(CALIBRATION_TICK_MS);
        }
        engine.ingest(&event.event, event.t, thresholds);
    }

    for _ in 0..engine.config().calibration_duration_secs {
        if let Some(outcome) = engine.calibration_tick(thresholds) {
            return outcome;
        }
    }
    Err(ExerciseError::InsufficientCalibrationData)
}

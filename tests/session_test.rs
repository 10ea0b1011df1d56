// ABOUTME: Integration tests for the asynchronous exercise session driver
// ABOUTME: Uses paused tokio time to check timers, calibration, stop semantics, and live threshold edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use hand_chicken::config::{DetectionThresholds, MotionEngineConfig, ThresholdField};
use hand_chicken::errors::{ErrorCode, ExerciseError};
use hand_chicken::models::{ActivityLabel, ActivityState, MotionEvent};
use hand_chicken::motion::CalibrationStatus;
use hand_chicken::session::{ExerciseSession, StaticPermission};
use hand_chicken::storage::ThresholdHandle;
use std::f64::consts::PI;
use std::time::Duration;
use tokio::time;

const SAMPLE_PERIOD: Duration = Duration::from_millis(20);

async fn start_session(thresholds: ThresholdHandle) -> Result<ExerciseSession> {
    Ok(ExerciseSession::start(
        &StaticPermission::GRANTED,
        thresholds,
        MotionEngineConfig::default(),
    )
    .await?)
}

/// Push `count` samples of a 2 Hz, amplitude 3 sine magnitude at 50 Hz
async fn push_walking(session: &ExerciseSession, count: u32) {
    for i in 0..count {
        let t = f64::from(i) * SAMPLE_PERIOD.as_secs_f64();
        let magnitude = 3.0f64.mul_add((2.0 * PI * 2.0 * t).sin(), 3.0);
        assert!(session.push(MotionEvent::linear(magnitude, 0.0, 0.0)));
        time::sleep(SAMPLE_PERIOD).await;
    }
}

/// Push samples alternating between 0.5 and 2.5 every 100 ms
async fn push_stepping(session: &ExerciseSession, count: u32) {
    for i in 0..count {
        let magnitude = if i % 2 == 0 { 0.5 } else { 2.5 };
        assert!(session.push(MotionEvent::linear(magnitude, 0.0, 0.0)));
        time::sleep(Duration::from_millis(100)).await;
    }
}

#[tokio::test]
async fn test_denied_permission_creates_no_session() {
    let thresholds = ThresholdHandle::default();
    let error = ExerciseSession::start(
        &StaticPermission::DENIED,
        thresholds.clone(),
        MotionEngineConfig::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::PermissionDenied);
    assert_eq!(thresholds.current(), DetectionThresholds::default());
}

#[tokio::test]
async fn test_invalid_engine_config_is_rejected() {
    let config = MotionEngineConfig {
        gravity_alpha: 1.5,
        ..MotionEngineConfig::default()
    };
    let error = ExerciseSession::start(&StaticPermission::GRANTED, ThresholdHandle::default(), config)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
}

#[tokio::test(start_paused = true)]
async fn test_sine_motion_is_classified_as_walking() -> Result<()> {
    let mut session = start_session(ThresholdHandle::default()).await?;
    push_walking(&session, 150).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.activity, ActivityState::Walking);
    let features = snapshot.last_features.expect("features computed");
    assert!((features.cadence_hz - 2.0).abs() <= 0.3, "{features:?}");

    let summary = session.stop().await?;
    assert_eq!(summary.final_activity, ActivityState::Walking);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_steps_are_debounced() -> Result<()> {
    let mut session = start_session(ThresholdHandle::default()).await?;
    push_stepping(&session, 20).await;

    // Steps at 100, 500, 900, 1300 and 1700 ms
    assert_eq!(session.snapshot().steps, 5);
    assert_eq!(session.stop().await?.steps, 5);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_duration_ticks_every_second() -> Result<()> {
    let mut session = start_session(ThresholdHandle::default()).await?;
    time::sleep(Duration::from_millis(3500)).await;
    assert_eq!(session.snapshot().duration_secs, 3);

    let summary = session.stop().await?;
    assert_eq!(summary.duration_secs, 3);
    assert_eq!(summary.session_id, session.id());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_idempotent_and_final() -> Result<()> {
    let mut session = start_session(ThresholdHandle::default()).await?;
    push_stepping(&session, 10).await;

    let first = session.stop().await?;
    let second = session.stop().await?;
    assert_eq!(first, second);
    assert!(!session.is_running());

    let before = session.snapshot();
    time::sleep(Duration::from_secs(5)).await;
    assert!(!session.push(MotionEvent::linear(9.0, 9.0, 9.0)));
    assert_eq!(session.snapshot(), before);
    assert_eq!(
        session.start_calibration(ActivityLabel::Walking).await,
        Err(ExerciseError::SessionNotActive)
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_second_calibration_start_is_rejected() -> Result<()> {
    let mut session = start_session(ThresholdHandle::default()).await?;
    session.start_calibration(ActivityLabel::Jumping).await?;
    assert_eq!(
        session.start_calibration(ActivityLabel::Walking).await,
        Err(ExerciseError::CalibrationAlreadyInProgress)
    );
    assert_eq!(
        session.snapshot().calibration,
        CalibrationStatus::Recording {
            label: ActivityLabel::Jumping,
            remaining_secs: 8,
        }
    );

    session.stop().await?;
    assert_eq!(session.snapshot().calibration, CalibrationStatus::Idle);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_walking_calibration_recommends_band_around_cadence() -> Result<()> {
    let thresholds = ThresholdHandle::default();
    let mut session = start_session(thresholds.clone()).await?;
    session.start_calibration(ActivityLabel::Walking).await?;
    push_walking(&session, 425).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.calibration, CalibrationStatus::Idle);
    let result = snapshot.last_calibration.expect("calibration finished");
    assert_eq!(result.label, ActivityLabel::Walking);
    assert!((399..=401).contains(&result.sample_count), "{}", result.sample_count);

    let min = result.recommended.cadence_walking_min.expect("cadence min");
    let max = result.recommended.cadence_walking_max.expect("cadence max");
    assert!(min < 2.0 && max > 2.0, "{min}..{max}");
    assert!(result.recommended.jump_amp_threshold.is_none());

    // Recommendations only reach the live thresholds when applied
    assert_eq!(thresholds.current(), DetectionThresholds::default());
    let applied = session.apply_last_calibration()?.expect("applied");
    assert_eq!(thresholds.current(), applied);
    assert!((applied.cadence_walking_max - max).abs() < f64::EPSILON);
    assert!(
        (applied.jump_amp_threshold - DetectionThresholds::default().jump_amp_threshold).abs()
            < f64::EPSILON
    );

    session.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_empty_calibration_leaves_thresholds_unchanged() -> Result<()> {
    let thresholds = ThresholdHandle::default();
    let mut session = start_session(thresholds.clone()).await?;
    session.start_calibration(ActivityLabel::Walking).await?;
    time::sleep(Duration::from_millis(8500)).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.calibration, CalibrationStatus::Idle);
    assert_eq!(
        snapshot.calibration_error,
        Some(ExerciseError::InsufficientCalibrationData)
    );
    assert!(snapshot.last_calibration.is_none());
    assert!(session.apply_last_calibration()?.is_none());
    assert_eq!(thresholds.current(), DetectionThresholds::default());

    session.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_threshold_edits_apply_mid_session() -> Result<()> {
    let thresholds = ThresholdHandle::default();
    let mut session = start_session(thresholds.clone()).await?;
    push_stepping(&session, 10).await;
    let steps = session.snapshot().steps;
    assert!(steps > 0);

    thresholds.set_field(ThresholdField::StepThreshold, 100.0)?;
    push_stepping(&session, 10).await;
    assert_eq!(session.snapshot().steps, steps);

    session.stop().await?;
    Ok(())
}

// ABOUTME: Asynchronous exercise session driving the motion engine from sensor events and timers
// ABOUTME: One task owns the engine; callers push samples, issue commands, and observe snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Session
//!
//! A session owns one [`ActivityEngine`] inside a spawned task. The task
//! multiplexes every input on a single logical timeline:
//!
//! - motion events pushed by the sensor callback through a bounded channel
//! - the classification timer (`featureComputeIntervalMs`, re-read every tick)
//! - the one-second duration timer
//! - the one-second calibration countdown while a run is recording
//! - control commands and the shutdown signal
//!
//! State is published through a `watch` channel as [`SessionSnapshot`].
//! Thresholds are read from the shared [`ThresholdHandle`] on every sample
//! and tick, so edits take effect without restarting the session.

/// Motion permission sources
pub mod permission;

pub use permission::{MotionPermission, PermissionState, StaticPermission};

use crate::storage::ThresholdHandle;
use chrono::{DateTime, Utc};
use hand_chicken_core::config::{DetectionThresholds, MotionEngineConfig};
use hand_chicken_core::errors::{AppError, AppResult, ExerciseError};
use hand_chicken_core::models::{ActivityLabel, ActivityState, MotionEvent};
use hand_chicken_motion::{ActivityEngine, CalibrationResult, CalibrationStatus, Features};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

const TICK: Duration = Duration::from_secs(1);
const COMMAND_CHANNEL_CAPACITY: usize = 8;

/// Observable session state
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Activity from the latest classification tick
    pub activity: ActivityState,
    /// Steps counted since the session started
    pub steps: u64,
    /// Whole seconds elapsed
    pub duration_secs: u64,
    /// Calibration countdown
    pub calibration: CalibrationStatus,
    /// Features behind the latest classification, if the window was large enough
    pub last_features: Option<Features>,
    /// Most recent successful calibration
    pub last_calibration: Option<CalibrationResult>,
    /// Failure of the most recent calibration run
    #[serde(skip)]
    pub calibration_error: Option<ExerciseError>,
}

/// Terminal record of a stopped session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Session identifier
    pub session_id: Uuid,
    /// Wall-clock start time
    pub started_at: DateTime<Utc>,
    /// Whole seconds the session ran
    pub duration_secs: u64,
    /// Steps counted
    pub steps: u64,
    /// Activity at the moment the session stopped
    pub final_activity: ActivityState,
    /// Most recent successful calibration
    pub last_calibration: Option<CalibrationResult>,
}

#[derive(Debug)]
enum SessionCommand {
    StartCalibration {
        label: ActivityLabel,
        reply: oneshot::Sender<Result<(), ExerciseError>>,
    },
}

/// Cloneable producer for the sensor callback.
///
/// Pushing never blocks: a full channel drops the event with a warning.
#[derive(Debug, Clone)]
pub struct MotionSink {
    tx: mpsc::Sender<(MotionEvent, Instant)>,
}

impl MotionSink {
    /// Queue one motion event stamped with its arrival time.
    ///
    /// Returns `false` when the event was dropped.
    pub fn push(&self, event: MotionEvent) -> bool {
        match self.tx.try_send((event, Instant::now())) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("motion event channel full, dropping sample");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

/// A running exercise session.
///
/// Dropping the session without calling [`Self::stop`] still shuts the
/// task down.
#[derive(Debug)]
pub struct ExerciseSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    thresholds: ThresholdHandle,
    sink: MotionSink,
    commands: mpsc::Sender<SessionCommand>,
    snapshot: watch::Receiver<SessionSnapshot>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<SessionSnapshot>>,
    summary: Option<SessionSummary>,
}

impl ExerciseSession {
    /// Request motion permission and start a session.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `PERMISSION_DENIED` when sensors are refused, in which case
    /// nothing is spawned, or a configuration error for an invalid `config`
    pub async fn start<P>(
        permission: &P,
        thresholds: ThresholdHandle,
        config: MotionEngineConfig,
    ) -> AppResult<Self>
    where
        P: MotionPermission + ?Sized,
    {
        config.validate()?;
        let state = permission.request().await;
        if !state.allows_sensors() {
            warn!(%state, "motion permission not granted");
            return Err(ExerciseError::permission_denied(format!("motion permission {state}")).into());
        }

        let id = Uuid::new_v4();
        let (sample_tx, sample_rx) = mpsc::channel(config.sample_channel_capacity);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::default());

        let mut engine = ActivityEngine::new(config);
        engine.activate();
        let driver = SessionDriver {
            engine,
            thresholds: thresholds.clone(),
            clock: Instant::now(),
            snapshot: snapshot_tx,
            next_calibration_tick: None,
        };
        let task = tokio::spawn(driver.run(sample_rx, command_rx, shutdown_rx));
        info!(session_id = %id, permission = %state, "exercise session started");

        Ok(Self {
            id,
            started_at: Utc::now(),
            thresholds,
            sink: MotionSink { tx: sample_tx },
            commands: command_tx,
            snapshot: snapshot_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
            summary: None,
        })
    }

    /// Session identifier
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Wall-clock start time
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Shared thresholds the session reads
    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdHandle {
        &self.thresholds
    }

    /// Whether [`Self::stop`] has not yet been called
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.summary.is_none()
    }

    /// Producer handle for the sensor callback
    #[must_use]
    pub fn sink(&self) -> MotionSink {
        self.sink.clone()
    }

    /// Queue one motion event; `false` if stopped or the channel is full
    pub fn push(&self, event: MotionEvent) -> bool {
        self.is_running() && self.sink.push(event)
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified on every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.clone()
    }

    /// Begin recording a labeled calibration run.
    ///
    /// # Errors
    ///
    /// Returns [`ExerciseError::SessionNotActive`] once the session stopped
    /// and [`ExerciseError::CalibrationAlreadyInProgress`] while a run is
    /// recording; neither changes any state
    pub async fn start_calibration(&self, label: ActivityLabel) -> Result<(), ExerciseError> {
        if !self.is_running() {
            return Err(ExerciseError::SessionNotActive);
        }
        let (reply, response) = oneshot::channel();
        self.commands
            .send(SessionCommand::StartCalibration { label, reply })
            .await
            .map_err(|_| ExerciseError::SessionNotActive)?;
        response.await.map_err(|_| ExerciseError::SessionNotActive)?
    }

    /// Copy the most recent calibration recommendation into the shared thresholds.
    ///
    /// Returns `None` when no calibration has finished yet.
    ///
    /// # Errors
    ///
    /// Returns an error and leaves the thresholds untouched if the merged
    /// values fail validation
    pub fn apply_last_calibration(&self) -> AppResult<Option<DetectionThresholds>> {
        let last = self.snapshot.borrow().last_calibration;
        let Some(result) = last else {
            return Ok(None);
        };
        let applied = self.thresholds.apply_recommendation(&result.recommended)?;
        info!(label = %result.label, "calibration recommendation applied");
        Ok(Some(applied))
    }

    /// Stop the session.
    ///
    /// Unsubscribes the sensor stream, clears every timer, and abandons any
    /// calibration run. Idempotent: later calls return the same summary.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the session task panicked
    pub async fn stop(&mut self) -> AppResult<SessionSummary> {
        if let Some(summary) = &self.summary {
            return Ok(summary.clone());
        }
        if let Some(shutdown) = self.shutdown.take() {
            if shutdown.send(()).is_err() {
                debug!(session_id = %self.id, "session task already finished");
            }
        }
        let last = match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| AppError::internal(format!("session task failed: {e}")))?,
            None => self.snapshot(),
        };

        let summary = SessionSummary {
            session_id: self.id,
            started_at: self.started_at,
            duration_secs: last.duration_secs,
            steps: last.steps,
            final_activity: last.activity,
            last_calibration: last.last_calibration,
        };
        info!(
            session_id = %self.id,
            steps = summary.steps,
            duration_secs = summary.duration_secs,
            "exercise session stopped"
        );
        self.summary = Some(summary.clone());
        Ok(summary)
    }
}

struct SessionDriver {
    engine: ActivityEngine,
    thresholds: ThresholdHandle,
    clock: Instant,
    snapshot: watch::Sender<SessionSnapshot>,
    next_calibration_tick: Option<Instant>,
}

impl SessionDriver {
    async fn run(
        mut self,
        mut samples: mpsc::Receiver<(MotionEvent, Instant)>,
        mut commands: mpsc::Receiver<SessionCommand>,
        mut shutdown: oneshot::Receiver<()>,
    ) -> SessionSnapshot {
        let mut duration_tick = time::interval_at(self.clock + TICK, TICK);
        duration_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut next_feature = self.clock + self.feature_interval();

        loop {
            let calibration_due = self.next_calibration_tick;
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                Some(command) = commands.recv() => self.handle_command(command),
                Some((event, at)) = samples.recv() => self.ingest(&event, at),
                () = time::sleep_until(next_feature) => {
                    self.classify(next_feature);
                    next_feature += self.feature_interval();
                }
                _ = duration_tick.tick() => {
                    self.snapshot.send_modify(|s| s.duration_secs += 1);
                }
                () = time::sleep_until(calibration_due.unwrap_or(next_feature)), if calibration_due.is_some() => {
                    self.tick_calibration();
                }
            }
        }

        self.engine.deactivate();
        self.snapshot.send_if_modified(|s| {
            let recording = s.calibration != CalibrationStatus::Idle;
            s.calibration = CalibrationStatus::Idle;
            recording
        });
        let last = self.snapshot.borrow().clone();
        last
    }

    fn feature_interval(&self) -> Duration {
        Duration::from_millis(self.thresholds.current().feature_compute_interval_ms)
    }

    fn elapsed_ms(&self, at: Instant) -> i64 {
        i64::try_from(at.saturating_duration_since(self.clock).as_millis()).unwrap_or(i64::MAX)
    }

    fn ingest(&mut self, event: &MotionEvent, at: Instant) {
        let timestamp = self.elapsed_ms(at);
        let Some(outcome) = self
            .engine
            .ingest(event, timestamp, &self.thresholds.current())
        else {
            return;
        };
        if outcome.step_detected {
            let steps = self.engine.steps();
            debug!(steps, timestamp, "step detected");
            self.snapshot.send_modify(|s| s.steps = steps);
        }
    }

    fn classify(&mut self, now: Instant) {
        let now_ms = self.elapsed_ms(now);
        let activity = self.engine.classify_tick(now_ms, &self.thresholds.current());
        let features = self.engine.last_features().copied();
        self.snapshot.send_if_modified(|s| {
            let changed = s.activity != activity || s.last_features != features;
            s.activity = activity;
            s.last_features = features;
            changed
        });
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::StartCalibration { label, reply } => {
                let now = Instant::now();
                let outcome = self.engine.start_calibration(label, self.elapsed_ms(now));
                if outcome.is_ok() {
                    self.next_calibration_tick = Some(now + TICK);
                    let status = self.engine.calibration_status();
                    self.snapshot.send_modify(|s| {
                        s.calibration = status;
                        s.calibration_error = None;
                    });
                }
                if reply.send(outcome).is_err() {
                    debug!("calibration requester went away");
                }
            }
        }
    }

    fn tick_calibration(&mut self) {
        let outcome = self.engine.calibration_tick(&self.thresholds.current());
        let status = self.engine.calibration_status();
        match outcome {
            None => {
                self.next_calibration_tick = self.next_calibration_tick.map(|due| due + TICK);
                self.snapshot.send_modify(|s| s.calibration = status);
            }
            Some(Ok(result)) => {
                self.next_calibration_tick = None;
                self.snapshot.send_modify(|s| {
                    s.calibration = status;
                    s.last_calibration = Some(result);
                });
            }
            Some(Err(error)) => {
                self.next_calibration_tick = None;
                self.snapshot.send_modify(|s| {
                    s.calibration = status;
                    s.calibration_error = Some(error);
                });
            }
        }
    }
}

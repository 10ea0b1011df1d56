// ABOUTME: Detection threshold persistence and the process-wide threshold handle
// ABOUTME: Loads fall back to defaults, saves surface persistence errors, edits are validated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::KeyValueStore;
use hand_chicken_core::config::{
    ConfigError, DetectionThresholds, RecommendedThresholds, ThresholdField,
};
use hand_chicken_core::constants::storage::THRESHOLDS_KEY;
use hand_chicken_core::errors::ExerciseError;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Persists [`DetectionThresholds`] under a fixed key
#[derive(Debug, Clone)]
pub struct ThresholdRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ThresholdRepository<S> {
    /// Repository over a key-value store
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load persisted thresholds.
    ///
    /// Never fails: a missing, unreadable, corrupt, or invalid blob yields
    /// the defaults.
    pub async fn load(&self) -> DetectionThresholds {
        let raw = match self.store.get(THRESHOLDS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no persisted thresholds, using defaults");
                return DetectionThresholds::default();
            }
            Err(error) => {
                warn!(%error, "threshold storage unreadable, using defaults");
                return DetectionThresholds::default();
            }
        };

        match serde_json::from_str::<DetectionThresholds>(&raw) {
            Ok(thresholds) => match thresholds.validate() {
                Ok(()) => thresholds,
                Err(error) => {
                    warn!(%error, "persisted thresholds invalid, using defaults");
                    DetectionThresholds::default()
                }
            },
            Err(error) => {
                warn!(%error, "persisted thresholds corrupt, using defaults");
                DetectionThresholds::default()
            }
        }
    }

    /// Persist the full threshold set
    ///
    /// # Errors
    ///
    /// Returns [`ExerciseError::PersistenceUnavailable`] when the blob cannot
    /// be serialized or written
    pub async fn save(&self, thresholds: &DetectionThresholds) -> Result<(), ExerciseError> {
        let blob = serde_json::to_string(thresholds)
            .map_err(|e| ExerciseError::persistence(e.to_string()))?;
        self.store
            .set(THRESHOLDS_KEY, &blob)
            .await
            .map_err(|e| ExerciseError::persistence(e.to_string()))?;
        info!("detection thresholds saved");
        Ok(())
    }

    /// Delete the persisted blob so the next load yields defaults
    ///
    /// # Errors
    ///
    /// Returns [`ExerciseError::PersistenceUnavailable`] when the blob cannot
    /// be removed
    pub async fn reset(&self) -> Result<DetectionThresholds, ExerciseError> {
        self.store
            .remove(THRESHOLDS_KEY)
            .await
            .map_err(|e| ExerciseError::persistence(e.to_string()))?;
        info!("detection thresholds reset to defaults");
        Ok(DetectionThresholds::default())
    }
}

/// Process-wide, observable detection thresholds.
///
/// Clones share the same value. Readers snapshot with [`Self::current`] on
/// every sample or tick, so an edit applies from the next one onward.
#[derive(Debug, Clone)]
pub struct ThresholdHandle {
    tx: Arc<watch::Sender<DetectionThresholds>>,
}

impl Default for ThresholdHandle {
    fn default() -> Self {
        Self::new(DetectionThresholds::default())
    }
}

impl ThresholdHandle {
    /// Handle holding `initial`
    #[must_use]
    pub fn new(initial: DetectionThresholds) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current thresholds
    #[must_use]
    pub fn current(&self) -> DetectionThresholds {
        *self.tx.borrow()
    }

    /// Replace every field
    ///
    /// # Errors
    ///
    /// Returns an error and keeps the current value if `thresholds` is invalid
    pub fn replace(&self, thresholds: DetectionThresholds) -> Result<(), ConfigError> {
        thresholds.validate()?;
        self.tx.send_replace(thresholds);
        debug!("detection thresholds replaced");
        Ok(())
    }

    /// Edit one numeric field
    ///
    /// # Errors
    ///
    /// Returns an error and keeps the current value if the edit is invalid
    pub fn set_field(
        &self,
        field: ThresholdField,
        value: f64,
    ) -> Result<DetectionThresholds, ConfigError> {
        self.update(|current| current.with_field(field, value))
    }

    /// Copy the fields a calibration recommended
    ///
    /// # Errors
    ///
    /// Returns an error and keeps the current value if the merged thresholds
    /// are invalid
    pub fn apply_recommendation(
        &self,
        recommendation: &RecommendedThresholds,
    ) -> Result<DetectionThresholds, ConfigError> {
        self.update(|current| {
            let mut merged = *current;
            merged.apply(recommendation);
            merged.validate()?;
            Ok(merged)
        })
    }

    /// Receiver notified on every change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DetectionThresholds> {
        self.tx.subscribe()
    }

    fn update<F>(&self, edit: F) -> Result<DetectionThresholds, ConfigError>
    where
        F: FnOnce(&DetectionThresholds) -> Result<DetectionThresholds, ConfigError>,
    {
        let mut edit = Some(edit);
        let mut outcome = Err(ConfigError::InvalidRange("threshold edit not applied"));
        self.tx.send_if_modified(|current| {
            let Some(edit) = edit.take() else {
                return false;
            };
            match edit(current) {
                Ok(updated) => {
                    let changed = updated != *current;
                    *current = updated;
                    outcome = Ok(updated);
                    changed
                }
                Err(error) => {
                    outcome = Err(error);
                    false
                }
            }
        });
        outcome
    }
}

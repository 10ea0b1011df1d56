// ABOUTME: Threshold management commands for hand-chicken-cli
// ABOUTME: Shows, edits one field of, or resets the persisted detection thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hand_chicken::config::ThresholdField;
use hand_chicken::errors::AppResult;
use hand_chicken::storage::{KeyValueStore, ThresholdHandle, ThresholdRepository};
use tracing::info;

use crate::helpers::display::display_thresholds;

/// Print the persisted thresholds, or defaults when none are saved
pub async fn show<S: KeyValueStore>(repository: &ThresholdRepository<S>, json: bool) -> AppResult<()> {
    let thresholds = repository.load().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&thresholds)?);
    } else {
        display_thresholds(&thresholds);
    }
    Ok(())
}

/// Edit one field and save the result
pub async fn set<S: KeyValueStore>(
    repository: &ThresholdRepository<S>,
    field: ThresholdField,
    value: f64,
) -> AppResult<()> {
    let handle = ThresholdHandle::new(repository.load().await);
    let updated = handle.set_field(field, value)?;
    repository.save(&updated).await?;
    info!(%field, value, "threshold updated");
    display_thresholds(&updated);
    Ok(())
}

/// Delete the persisted thresholds
pub async fn reset<S: KeyValueStore>(repository: &ThresholdRepository<S>) -> AppResult<()> {
    let defaults = repository.reset().await?;
    println!("Thresholds reset to defaults.");
    display_thresholds(&defaults);
    Ok(())
}

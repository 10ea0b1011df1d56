// ABOUTME: Integration tests for key-value stores and detection threshold persistence
// ABOUTME: Covers file-backed round trips, corrupt blobs, reset, and storage failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use async_trait::async_trait;
use hand_chicken::config::{DetectionThresholds, ThresholdField};
use hand_chicken::constants::storage::THRESHOLDS_KEY;
use hand_chicken::errors::{AppError, AppResult, ErrorCode, ExerciseError};
use hand_chicken::storage::{
    FileStore, InMemoryStore, KeyValueStore, ThresholdHandle, ThresholdRepository,
};
use tempfile::TempDir;

/// Store whose every operation fails
struct UnavailableStore;

#[async_trait]
impl KeyValueStore for UnavailableStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::storage("disk unplugged"))
    }

    async fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::storage("disk unplugged"))
    }

    async fn remove(&self, _key: &str) -> AppResult<()> {
        Err(AppError::storage("disk unplugged"))
    }
}

fn edited() -> DetectionThresholds {
    DetectionThresholds::default()
        .with_field(ThresholdField::StepThreshold, 1.6)
        .unwrap()
        .with_field(ThresholdField::MinStepIntervalMs, 250.0)
        .unwrap()
}

#[tokio::test]
async fn test_file_store_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileStore::new(dir.path().join("nested"));

    assert_eq!(store.get("missing").await?, None);
    store.set("pet.name", "\"Nugget\"").await?;
    assert_eq!(store.get("pet.name").await?.as_deref(), Some("\"Nugget\""));

    store.remove("pet.name").await?;
    store.remove("pet.name").await?;
    assert_eq!(store.get("pet.name").await?, None);
    Ok(())
}

#[tokio::test]
async fn test_file_store_rejects_path_like_keys() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileStore::new(dir.path());
    for key in ["", "../escape", ".hidden", "a/b"] {
        let error = store.set(key, "{}").await.unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput, "key {key:?}");
    }
    Ok(())
}

#[tokio::test]
async fn test_thresholds_survive_a_new_repository() -> Result<()> {
    let dir = TempDir::new()?;
    let thresholds = edited();

    ThresholdRepository::new(FileStore::new(dir.path()))
        .save(&thresholds)
        .await?;
    let reloaded = ThresholdRepository::new(FileStore::new(dir.path()))
        .load()
        .await;
    assert_eq!(reloaded, thresholds);
    Ok(())
}

#[tokio::test]
async fn test_missing_blob_loads_defaults() {
    let repository = ThresholdRepository::new(InMemoryStore::new());
    assert_eq!(repository.load().await, DetectionThresholds::default());
}

#[tokio::test]
async fn test_corrupt_blob_loads_defaults() -> Result<()> {
    let store = InMemoryStore::new();
    store.set(THRESHOLDS_KEY, "{not json").await?;
    let repository = ThresholdRepository::new(store);
    assert_eq!(repository.load().await, DetectionThresholds::default());
    Ok(())
}

#[tokio::test]
async fn test_invalid_blob_loads_defaults() -> Result<()> {
    let store = InMemoryStore::new();
    let mut invalid = serde_json::to_value(DetectionThresholds::default())?;
    invalid["cadenceWalkingMin"] = serde_json::json!(3.0);
    invalid["cadenceWalkingMax"] = serde_json::json!(1.0);
    store.set(THRESHOLDS_KEY, &invalid.to_string()).await?;

    let repository = ThresholdRepository::new(store);
    assert_eq!(repository.load().await, DetectionThresholds::default());
    Ok(())
}

#[tokio::test]
async fn test_reset_removes_persisted_blob() -> Result<()> {
    let store = InMemoryStore::new();
    let repository = ThresholdRepository::new(store.clone());
    repository.save(&edited()).await?;
    assert!(!store.is_empty().await);

    assert_eq!(repository.reset().await?, DetectionThresholds::default());
    assert!(store.is_empty().await);
    assert_eq!(repository.load().await, DetectionThresholds::default());
    Ok(())
}

#[tokio::test]
async fn test_unavailable_storage_keeps_in_memory_thresholds() {
    let handle = ThresholdHandle::default();
    let updated = handle
        .set_field(ThresholdField::MagPeakThreshold, 1.4)
        .unwrap();

    let repository = ThresholdRepository::new(UnavailableStore);
    let error = repository.save(&handle.current()).await.unwrap_err();
    assert!(matches!(error, ExerciseError::PersistenceUnavailable { .. }));
    assert_eq!(error.code(), ErrorCode::StorageError);
    assert_eq!(handle.current(), updated);

    assert!(repository.reset().await.is_err());
    assert_eq!(repository.load().await, DetectionThresholds::default());
}

#[tokio::test]
async fn test_handle_rejects_invalid_edits() {
    let handle = ThresholdHandle::default();
    let mut changes = handle.subscribe();

    assert!(handle
        .set_field(ThresholdField::CadenceWalkingMin, 9.0)
        .is_err());
    assert!(handle.set_field(ThresholdField::StepThreshold, -1.0).is_err());
    assert!(handle
        .set_field(ThresholdField::FeatureComputeIntervalMs, 0.0)
        .is_err());
    assert_eq!(handle.current(), DetectionThresholds::default());
    assert!(!changes.has_changed().unwrap());

    handle
        .set_field(ThresholdField::FeatureComputeIntervalMs, 500.0)
        .unwrap();
    assert!(changes.has_changed().unwrap());
    assert_eq!(changes.borrow_and_update().feature_compute_interval_ms, 500);
}

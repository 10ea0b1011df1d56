// ABOUTME: Durable key-value storage abstraction with pluggable backends
// ABOUTME: In-memory and file-backed stores plus the detection threshold repository
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// One-JSON-file-per-key store
pub mod file;
/// In-memory store for tests and ephemeral sessions
pub mod memory;
/// Threshold persistence and the shared threshold handle
pub mod thresholds;

pub use file::FileStore;
pub use memory::InMemoryStore;
pub use thresholds::{ThresholdHandle, ThresholdRepository};

use hand_chicken_core::errors::AppResult;

/// Key-value storage for small string blobs
///
/// # Examples
///
/// ```rust,no_run
/// use hand_chicken::storage::{InMemoryStore, KeyValueStore};
/// # async fn example() -> hand_chicken::errors::AppResult<()> {
/// let store = InMemoryStore::new();
/// store.set("greeting", "\"hello\"").await?;
/// assert_eq!(store.get("greeting").await?.as_deref(), Some("\"hello\""));
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never written
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete a value; deleting a missing key succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn remove(&self, key: &str) -> AppResult<()>;
}

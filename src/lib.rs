// ABOUTME: Main library entry point for the hand-chicken fitness companion runtime
// ABOUTME: Exercise sessions, threshold storage, native bridge, rewards, and location quests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Hand-Chicken
//!
//! Runtime for a virtual pet that grows with the user's real-world activity.
//! Accelerometer events drive an on-device activity classifier; location
//! quests and daily quests turn that activity into pet stats.
//!
//! ## Architecture
//!
//! - **`hand-chicken-core`**: errors, constants, models, threshold configuration
//! - **`hand-chicken-motion`**: gravity separation, windowing, step and peak
//!   detection, features, classification, calibration
//! - **this crate**: the async session driver, storage, logging, environment
//!   configuration, native bridge, rewards, and quests
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use hand_chicken::config::MotionEngineConfig;
//! use hand_chicken::errors::AppResult;
//! use hand_chicken::models::MotionEvent;
//! use hand_chicken::session::{ExerciseSession, StaticPermission};
//! use hand_chicken::storage::ThresholdHandle;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let thresholds = ThresholdHandle::default();
//!     let mut session = ExerciseSession::start(
//!         &StaticPermission::GRANTED,
//!         thresholds,
//!         MotionEngineConfig::default(),
//!     )
//!     .await?;
//!
//!     session.push(MotionEvent::linear(0.1, 0.2, 1.4));
//!     let summary = session.stop().await?;
//!     println!("steps: {}", summary.steps);
//!     Ok(())
//! }
//! ```

/// Native shell messages and location lookup
pub mod bridge;

/// Environment and runtime configuration
pub mod config;

/// Domain constants
pub mod constants;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Motion data models
pub mod models;

/// Location quests and geofencing
pub mod quests;

/// Session rewards and daily quests
pub mod rewards;

/// Async exercise session driver
pub mod session;

/// Key-value storage and threshold persistence
pub mod storage;

/// Shared weather state
pub mod weather;

pub use hand_chicken_motion as motion;

// ABOUTME: Core data models shared by the motion engine and the runtime
// ABOUTME: Motion events, linear-acceleration samples, activity states, and calibration labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Activity states and calibration labels
pub mod activity;
/// Motion events, vectors, and timestamped samples
pub mod sample;

pub use activity::{ActivityLabel, ActivityState};
pub use sample::{AccelerationReading, Axis, MotionEvent, MotionVector, Sample};

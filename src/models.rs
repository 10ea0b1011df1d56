// ABOUTME: Re-exports motion data models from hand-chicken-core
// ABOUTME: Samples, motion events, axes, activity states, and calibration labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use hand_chicken_core::models::*;

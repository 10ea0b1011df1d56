// ABOUTME: Re-exports domain constants from hand-chicken-core
// ABOUTME: Threshold defaults, engine tuning, storage keys, reward and location constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use hand_chicken_core::constants::*;

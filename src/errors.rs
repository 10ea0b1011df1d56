// ABOUTME: Re-exports error types from hand-chicken-core for unified type identity
// ABOUTME: Ensures AppError/ExerciseError are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use hand_chicken_core::errors::*;

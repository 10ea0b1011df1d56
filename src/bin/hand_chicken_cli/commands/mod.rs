// ABOUTME: Re-exports command modules for hand-chicken-cli
// ABOUTME: Provides trace replay, calibration, and threshold management commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod calibrate;
pub mod replay;
pub mod thresholds;

// ABOUTME: Re-exports helper modules for hand-chicken-cli
// ABOUTME: Provides trace replay and display formatting utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
pub mod trace;

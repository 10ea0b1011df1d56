// ABOUTME: Activity classification states and calibration labels
// ABOUTME: Serializes as lowercase names for the presentation layer and CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Activity currently detected during an exercise session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityState {
    /// Little or no motion
    #[default]
    Idle,
    /// Periodic motion inside the walking cadence band
    Walking,
    /// High-amplitude motion dominated by vertical peaks
    Jumping,
    /// Motion that matches no rule
    Unknown,
}

impl ActivityState {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Jumping => "jumping",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity a calibration run records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLabel {
    /// Walking calibration tunes step and cadence thresholds
    Walking,
    /// Jumping calibration tunes the jump amplitude threshold
    Jumping,
}

impl fmt::Display for ActivityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Walking => f.write_str("walking"),
            Self::Jumping => f.write_str("jumping"),
        }
    }
}

impl FromStr for ActivityLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walking" | "walk" => Ok(Self::Walking),
            "jumping" | "jump" => Ok(Self::Jumping),
            other => Err(format!("unknown calibration label '{other}'")),
        }
    }
}

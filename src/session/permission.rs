// ABOUTME: Motion sensor permission abstraction gating exercise sessions
// ABOUTME: Platforms report granted, denied, or not required; sessions only start when not denied
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a motion permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionState {
    /// The user granted sensor access
    Granted,
    /// The user or platform refused sensor access
    Denied,
    /// The platform exposes motion events without asking
    NotRequired,
}

impl PermissionState {
    /// Whether the motion stream may be subscribed
    #[must_use]
    pub const fn allows_sensors(self) -> bool {
        !matches!(self, Self::Denied)
    }

    /// Interpret the string outcome some platforms report
    #[must_use]
    pub fn from_platform(outcome: &str) -> Self {
        match outcome.trim().to_lowercase().as_str() {
            "granted" => Self::Granted,
            "not-required" | "notrequired" => Self::NotRequired,
            _ => Self::Denied,
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => f.write_str("granted"),
            Self::Denied => f.write_str("denied"),
            Self::NotRequired => f.write_str("not required"),
        }
    }
}

/// Asynchronous source of the motion permission outcome
#[async_trait]
pub trait MotionPermission: Send + Sync {
    /// Ask the platform for motion sensor access
    async fn request(&self) -> PermissionState;
}

/// Permission source with a fixed answer, for replays and tests
#[derive(Debug, Clone, Copy)]
pub struct StaticPermission(pub PermissionState);

impl StaticPermission {
    /// Always granted
    pub const GRANTED: Self = Self(PermissionState::Granted);
    /// Always denied
    pub const DENIED: Self = Self(PermissionState::Denied);
}

#[async_trait]
impl MotionPermission for StaticPermission {
    async fn request(&self) -> PermissionState {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_strings() {
        assert_eq!(PermissionState::from_platform("granted"), PermissionState::Granted);
        assert_eq!(PermissionState::from_platform("denied"), PermissionState::Denied);
        assert_eq!(PermissionState::from_platform(""), PermissionState::Denied);
        assert!(PermissionState::NotRequired.allows_sensors());
        assert!(!PermissionState::Denied.allows_sensors());
    }
}

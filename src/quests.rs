// ABOUTME: Location quests at real-world landmarks with geofenced accept and check-in
// ABOUTME: Haversine distance, range checks, and the available -> in-progress -> completed lifecycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hand_chicken_core::constants::location::{DEFAULT_QUEST_RADIUS_M, EARTH_RADIUS_M};
use hand_chicken_core::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A point on the earth in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance in meters
#[must_use]
pub fn haversine_distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_phi = (to.lat - from.lat).to_radians();
    let d_lambda = (to.lng - from.lng).to_radians();

    let half_phi = (d_phi / 2.0).sin();
    let half_lambda = (d_lambda / 2.0).sin();
    let a = (phi1.cos() * phi2.cos()).mul_add(half_lambda * half_lambda, half_phi * half_phi);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Quest lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestStatus {
    /// Not yet accepted
    #[default]
    Available,
    /// Accepted, waiting for a check-in on site
    InProgress,
    /// Checked in
    Completed,
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => f.write_str("available"),
            Self::InProgress => f.write_str("in-progress"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// Stat bonus granted on check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestBonus {
    /// Strength points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<u32>,
    /// Mood points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<u32>,
}

/// A landmark quest as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestLocation {
    /// Quest identifier
    pub id: String,
    /// Landmark name
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Landmark category
    #[serde(default)]
    pub category: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Bonus on completion
    #[serde(default)]
    pub bonus: QuestBonus,
    /// Check-in radius; absent or zero means the default radius
    #[serde(default, rename = "requiredDistance")]
    pub required_distance_m: Option<f64>,
    /// Lifecycle state
    #[serde(default)]
    pub status: QuestStatus,
}

impl QuestLocation {
    /// Landmark position
    #[must_use]
    pub const fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// Effective check-in radius
    #[must_use]
    pub fn radius_m(&self) -> f64 {
        self.required_distance_m
            .filter(|radius| *radius > 0.0)
            .unwrap_or(DEFAULT_QUEST_RADIUS_M)
    }

    /// Distance from the user, if their position is known
    #[must_use]
    pub fn distance_from(&self, user: Option<GeoPoint>) -> Option<f64> {
        user.map(|user| haversine_distance_m(user, self.position()))
    }

    /// Whether the user may act on this quest.
    ///
    /// Developer mode is always in range; an unknown position never is.
    #[must_use]
    pub fn is_in_range(&self, user: Option<GeoPoint>, dev_mode: bool) -> bool {
        dev_mode
            || self
                .distance_from(user)
                .is_some_and(|distance| distance <= self.radius_m())
    }

    /// Accept an available quest
    ///
    /// # Errors
    ///
    /// Fails when the user is out of range or the quest is not available
    pub fn accept(&mut self, user: Option<GeoPoint>, dev_mode: bool) -> Result<(), QuestError> {
        self.transition(QuestStatus::Available, QuestStatus::InProgress, user, dev_mode)
    }

    /// Check in on an accepted quest
    ///
    /// # Errors
    ///
    /// Fails when the user is out of range or the quest is not in progress
    pub fn complete(&mut self, user: Option<GeoPoint>, dev_mode: bool) -> Result<(), QuestError> {
        self.transition(QuestStatus::InProgress, QuestStatus::Completed, user, dev_mode)
    }

    fn transition(
        &mut self,
        from: QuestStatus,
        to: QuestStatus,
        user: Option<GeoPoint>,
        dev_mode: bool,
    ) -> Result<(), QuestError> {
        if self.status != from {
            return Err(QuestError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        if !self.is_in_range(user, dev_mode) {
            return Err(QuestError::OutOfRange {
                distance_m: self.distance_from(user),
                radius_m: self.radius_m(),
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Quest action failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuestError {
    /// The user is too far away or their position is unknown
    #[error("not within {radius_m:.0} m of the landmark")]
    OutOfRange {
        /// Distance to the landmark, if the position is known
        distance_m: Option<f64>,
        /// Check-in radius
        radius_m: f64,
    },
    /// The quest is not in the state the action requires
    #[error("cannot move quest from {from} to {to}")]
    InvalidTransition {
        /// Current state
        from: QuestStatus,
        /// Requested state
        to: QuestStatus,
    },
}

impl From<QuestError> for AppError {
    fn from(error: QuestError) -> Self {
        let code = match error {
            QuestError::OutOfRange { .. } => ErrorCode::InvalidInput,
            QuestError::InvalidTransition { .. } => ErrorCode::InvalidState,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

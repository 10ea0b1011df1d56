// ABOUTME: Exercise session and calibration error taxonomy
// ABOUTME: Permission, calibration precondition, and persistence failures with AppError conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};

/// Errors raised by the exercise session, calibration engine, and threshold storage.
///
/// Insufficient window data is not part of this taxonomy: the feature
/// extractor reports it as `None` and the classifier falls back to idle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExerciseError {
    /// Sensor access not granted, so no session was created
    #[error("Motion permission denied: {reason}")]
    PermissionDenied {
        /// Outcome reported by the platform
        reason: String,
    },

    /// Calibration finished with an empty buffer
    #[error("Calibration recorded no samples")]
    InsufficientCalibrationData,

    /// A calibration run is already recording
    #[error("Calibration already in progress")]
    CalibrationAlreadyInProgress,

    /// No active session with granted sensors
    #[error("No active exercise session")]
    SessionNotActive,

    /// Durable storage could not be read or written
    #[error("Persistence unavailable: {reason}")]
    PersistenceUnavailable {
        /// Underlying storage failure
        reason: String,
    },
}

impl ExerciseError {
    /// Create a permission denied error
    #[must_use]
    pub fn permission_denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            reason: reason.into(),
        }
    }

    /// Create a persistence error
    #[must_use]
    pub fn persistence(reason: impl Into<String>) -> Self {
        Self::PersistenceUnavailable {
            reason: reason.into(),
        }
    }

    /// Error code reported to the presentation layer
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            Self::InsufficientCalibrationData => ErrorCode::InsufficientData,
            Self::CalibrationAlreadyInProgress => ErrorCode::CalibrationInProgress,
            Self::SessionNotActive => ErrorCode::SessionNotActive,
            Self::PersistenceUnavailable { .. } => ErrorCode::StorageError,
        }
    }
}

impl From<ExerciseError> for AppError {
    fn from(error: ExerciseError) -> Self {
        Self::new(error.code(), error.to_string()).with_source(error)
    }
}

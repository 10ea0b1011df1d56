// ABOUTME: Unified error handling for the hand-chicken engine and runtime
// ABOUTME: Defines ErrorCode, AppError, AppResult and the exercise error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the runtime returns [`AppResult`]. Domain
//! errors raised by the exercise session and calibration flow are modelled by
//! [`ExerciseError`] and convert into [`AppError`] with a stable [`ErrorCode`]
//! so the presentation layer can map them to user-visible messages.

mod exercise;

pub use exercise::ExerciseError;

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Sensors & permissions (1000-1999)
    /// Motion sensor access was not granted
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1004,

    // Validation (3000-3999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Input could not be parsed
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,
    /// Numeric value outside its allowed range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Session state (4000-4999)
    /// Not enough recorded data to derive a result
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData = 4000,
    /// A calibration run is already recording
    #[serde(rename = "CALIBRATION_IN_PROGRESS")]
    CalibrationInProgress = 4002,
    /// No exercise session with granted sensors is running
    #[serde(rename = "SESSION_NOT_ACTIVE")]
    SessionNotActive = 4003,
    /// Invalid state transition on a quest or session
    #[serde(rename = "INVALID_STATE")]
    InvalidState = 4004,

    // External collaborators (5000-5999)
    /// Native shell or geolocation provider failed
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// External collaborator did not answer in time
    #[serde(rename = "EXTERNAL_SERVICE_TIMEOUT")]
    ExternalServiceTimeout = 5001,

    // Configuration (6000-6999)
    /// Configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Durable storage read or write failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Motion sensor permission is required to count steps",
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidFormat => "The data format is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::InsufficientData => "Not enough motion data was recorded",
            Self::CalibrationInProgress => "A calibration run is already in progress",
            Self::SessionNotActive => "Start an exercise session before calibrating",
            Self::InvalidState => "The requested transition is not allowed",
            Self::ExternalServiceError => "An external collaborator encountered an error",
            Self::ExternalServiceTimeout => "An external collaborator did not respond in time",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional structured context
    pub details: serde_json::Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: serde_json::Value::Null,
            source: None,
        }
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Invalid state transition
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    /// Storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Configuration failure
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// External collaborator failure
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_to_stable_name() {
        let json = serde_json::to_string(&ErrorCode::CalibrationInProgress).unwrap();
        assert_eq!(json, "\"CALIBRATION_IN_PROGRESS\"");
    }

    #[test]
    fn test_app_error_display_includes_description() {
        let error = AppError::storage("disk full");
        assert_eq!(error.code, ErrorCode::StorageError);
        assert_eq!(error.to_string(), "Storage operation failed: disk full");
    }

    #[test]
    fn test_exercise_error_maps_to_code() {
        let error: AppError = ExerciseError::SessionNotActive.into();
        assert_eq!(error.code, ErrorCode::SessionNotActive);

        let error: AppError = ExerciseError::permission_denied("user refused").into();
        assert_eq!(error.code, ErrorCode::PermissionDenied);
        assert!(error.message.contains("user refused"));
    }
}

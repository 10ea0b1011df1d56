// ABOUTME: Typed messages exchanged with the native mobile shell hosting the web view
// ABOUTME: Tagged-union decode with coordinate validation and typed errors for malformed payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Native Bridge
//!
//! The shell and the web view exchange JSON strings shaped as
//! `{ "name": ..., "data": ... }`. Requests carry `"data": null`; responses
//! carry the payload named by `name`.

/// Location lookup with native-first fallback to browser geolocation
pub mod location;

pub use location::{GeolocationProvider, LocationResolver, LocationSource, NativeBridge, ResolvedLocation};

use hand_chicken_core::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Position reported by the shell or the browser
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCoords {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Horizontal accuracy in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// Altitude in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Altitude accuracy in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_accuracy: Option<f64>,
    /// Heading in degrees clockwise from north
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    /// Ground speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl LocationCoords {
    /// Coordinates without the optional extras
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            altitude: None,
            altitude_accuracy: None,
            heading: None,
            speed: None,
        }
    }

    /// Check that latitude and longitude are finite and on the globe
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidCoordinates`] otherwise
    pub fn validate(&self) -> Result<(), BridgeError> {
        let latitude_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let longitude_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if latitude_ok && longitude_ok {
            Ok(())
        } else {
            Err(BridgeError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Shell user identifiers arrive as strings or numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Numeric identifier
    Number(i64),
    /// Textual identifier
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Signed-in user as known to the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// User identifier
    pub id: UserId,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Message received from the shell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name", content = "data")]
pub enum BridgeMessage {
    /// Current device position
    #[serde(rename = "location")]
    Location(LocationCoords),
    /// Signed-in user
    #[serde(rename = "userinfo")]
    UserInfo(UserInfo),
}

#[derive(Deserialize)]
struct Envelope {
    name: Option<String>,
    #[serde(default)]
    data: Value,
}

impl BridgeMessage {
    /// Wire name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Location(_) => "location",
            Self::UserInfo(_) => "userinfo",
        }
    }

    /// Decode and validate one message string
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] describing why the payload was rejected
    pub fn decode(raw: &str) -> Result<Self, BridgeError> {
        let envelope: Envelope =
            serde_json::from_str(raw).map_err(|e| BridgeError::MalformedJson(e.to_string()))?;
        let name = envelope.name.ok_or(BridgeError::MissingName)?;
        if envelope.data.is_null() {
            return Err(BridgeError::MissingData(name));
        }

        match name.as_str() {
            "location" => {
                let coords: LocationCoords = serde_json::from_value(envelope.data)
                    .map_err(|e| BridgeError::InvalidPayload {
                        name: name.clone(),
                        reason: e.to_string(),
                    })?;
                coords.validate()?;
                Ok(Self::Location(coords))
            }
            "userinfo" => {
                let user: UserInfo = serde_json::from_value(envelope.data)
                    .map_err(|e| BridgeError::InvalidPayload {
                        name: name.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(Self::UserInfo(user))
            }
            _ => Err(BridgeError::UnknownMessage(name)),
        }
    }
}

/// Request sent to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeRequest {
    /// Ask for the device position
    Location,
    /// Ask for the signed-in user
    UserInfo,
}

impl BridgeRequest {
    /// Wire name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::UserInfo => "userinfo",
        }
    }

    /// Encode as `{"name": ..., "data": null}`
    #[must_use]
    pub fn encode(self) -> String {
        serde_json::json!({ "name": self.name(), "data": Value::Null }).to_string()
    }
}

/// Rejected bridge payloads
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    /// Not JSON, or not a JSON object
    #[error("malformed bridge message: {0}")]
    MalformedJson(String),
    /// Object without a `name`
    #[error("bridge message has no name")]
    MissingName,
    /// Response without a payload
    #[error("bridge message '{0}' has no data")]
    MissingData(String),
    /// Name this client does not understand
    #[error("unknown bridge message '{0}'")]
    UnknownMessage(String),
    /// Payload does not match the named message
    #[error("invalid '{name}' payload: {reason}")]
    InvalidPayload {
        /// Message name
        name: String,
        /// Decoder failure
        reason: String,
    },
    /// Coordinates outside the globe
    #[error("coordinates out of range: ({latitude}, {longitude})")]
    InvalidCoordinates {
        /// Reported latitude
        latitude: f64,
        /// Reported longitude
        longitude: f64,
    },
}

impl From<BridgeError> for AppError {
    fn from(error: BridgeError) -> Self {
        let code = match error {
            BridgeError::MalformedJson(_) => ErrorCode::InvalidFormat,
            BridgeError::InvalidCoordinates { .. } => ErrorCode::ValueOutOfRange,
            BridgeError::MissingName
            | BridgeError::MissingData(_)
            | BridgeError::UnknownMessage(_)
            | BridgeError::InvalidPayload { .. } => ErrorCode::InvalidInput,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

// ABOUTME: Device location lookup that prefers the native shell and falls back to browser GPS
// ABOUTME: Each source is bounded by its own timeout so a silent shell never blocks the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{BridgeMessage, BridgeRequest, LocationCoords};
use async_trait::async_trait;
use hand_chicken_core::constants::location::{NATIVE_LOCATION_TIMEOUT_MS, WEB_GPS_TIMEOUT_MS};
use hand_chicken_core::errors::{AppError, AppResult, ErrorCode};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::time;
use tracing::{debug, info, warn};

/// Message channel to the native shell
#[async_trait]
pub trait NativeBridge: Send + Sync {
    /// Send one encoded request to the shell
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be reached
    async fn post_message(&self, message: String) -> AppResult<()>;

    /// Stream of raw messages the shell sends back
    fn subscribe(&self) -> broadcast::Receiver<String>;
}

/// Browser geolocation
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Current position
    ///
    /// # Errors
    ///
    /// Returns an error if geolocation is unsupported or refused
    async fn current_position(&self) -> AppResult<LocationCoords>;
}

/// Where a resolved position came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// Native shell
    Native,
    /// Browser geolocation
    Browser,
}

/// Position plus its source
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedLocation {
    /// Position
    pub coords: LocationCoords,
    /// Source
    pub source: LocationSource,
}

/// Native-first location lookup
#[derive(Clone)]
pub struct LocationResolver {
    native: Option<Arc<dyn NativeBridge>>,
    geolocation: Arc<dyn GeolocationProvider>,
    native_timeout: Duration,
    geolocation_timeout: Duration,
}

impl LocationResolver {
    /// Resolver with the default timeouts; pass `None` when no shell hosts the app
    #[must_use]
    pub fn new(
        native: Option<Arc<dyn NativeBridge>>,
        geolocation: Arc<dyn GeolocationProvider>,
    ) -> Self {
        Self {
            native,
            geolocation,
            native_timeout: Duration::from_millis(NATIVE_LOCATION_TIMEOUT_MS),
            geolocation_timeout: Duration::from_millis(WEB_GPS_TIMEOUT_MS),
        }
    }

    /// Override both timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, native: Duration, geolocation: Duration) -> Self {
        self.native_timeout = native;
        self.geolocation_timeout = geolocation;
        self
    }

    /// Resolve the current position.
    ///
    /// Asks the shell first when one is present. A shell that fails, or sends
    /// no valid location before its timeout, hands over to browser
    /// geolocation.
    ///
    /// # Errors
    ///
    /// Returns an error when browser geolocation fails or times out
    pub async fn resolve(&self) -> AppResult<ResolvedLocation> {
        if let Some(native) = &self.native {
            match time::timeout(self.native_timeout, Self::ask_native(native.as_ref())).await {
                Ok(Ok(coords)) => {
                    info!("location resolved by native shell");
                    return Ok(ResolvedLocation {
                        coords,
                        source: LocationSource::Native,
                    });
                }
                Ok(Err(error)) => warn!(%error, "native location failed, falling back to geolocation"),
                Err(_) => warn!(
                    timeout_ms = self.native_timeout.as_millis(),
                    "native shell did not answer, falling back to geolocation"
                ),
            }
        }

        let coords = time::timeout(self.geolocation_timeout, self.geolocation.current_position())
            .await
            .map_err(|_| {
                AppError::new(
                    ErrorCode::ExternalServiceTimeout,
                    format!(
                        "geolocation did not answer within {} ms",
                        self.geolocation_timeout.as_millis()
                    ),
                )
            })??;
        info!("location resolved by browser geolocation");
        Ok(ResolvedLocation {
            coords,
            source: LocationSource::Browser,
        })
    }

    async fn ask_native(native: &dyn NativeBridge) -> AppResult<LocationCoords> {
        let mut inbound = native.subscribe();
        native.post_message(BridgeRequest::Location.encode()).await?;

        loop {
            let raw = match inbound.recv().await {
                Ok(raw) => raw,
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "bridge receiver lagged");
                    continue;
                }
                Err(RecvError::Closed) => {
                    return Err(AppError::external_service("native shell", "bridge closed"));
                }
            };
            match BridgeMessage::decode(&raw) {
                Ok(BridgeMessage::Location(coords)) => return Ok(coords),
                Ok(other) => debug!(name = other.name(), "ignoring bridge message"),
                Err(error) => warn!(%error, "rejected bridge message"),
            }
        }
    }
}

// ABOUTME: Integration tests for native bridge message decoding and location resolution
// ABOUTME: Fake shells and geolocation providers exercise fallbacks and timeouts under paused time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use async_trait::async_trait;
use hand_chicken::bridge::{
    BridgeError, BridgeMessage, BridgeRequest, GeolocationProvider, LocationCoords,
    LocationResolver, LocationSource, NativeBridge, UserId,
};
use hand_chicken::errors::{AppError, AppResult, ErrorCode};
use std::future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

/// Shell that answers every posted request with canned replies
struct FakeShell {
    inbound: broadcast::Sender<String>,
    replies: Vec<String>,
    posted: Mutex<Vec<String>>,
}

impl FakeShell {
    fn new(replies: &[&str]) -> Arc<Self> {
        let (inbound, _) = broadcast::channel(16);
        Arc::new(Self {
            inbound,
            replies: replies.iter().map(|reply| (*reply).to_owned()).collect(),
            posted: Mutex::new(Vec::new()),
        })
    }

    fn posted(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl NativeBridge for FakeShell {
    async fn post_message(&self, message: String) -> AppResult<()> {
        self.posted.lock().unwrap().push(message);
        for reply in &self.replies {
            let _ = self.inbound.send(reply.clone());
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        self.inbound.subscribe()
    }
}

struct FixedGeolocation(LocationCoords);

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> AppResult<LocationCoords> {
        Ok(self.0)
    }
}

struct SilentGeolocation;

#[async_trait]
impl GeolocationProvider for SilentGeolocation {
    async fn current_position(&self) -> AppResult<LocationCoords> {
        future::pending().await
    }
}

struct DeniedGeolocation;

#[async_trait]
impl GeolocationProvider for DeniedGeolocation {
    async fn current_position(&self) -> AppResult<LocationCoords> {
        Err(AppError::external_service("geolocation", "user denied"))
    }
}

const BROWSER_FIX: LocationCoords = LocationCoords::new(25.0330, 121.5654);

fn browser() -> Arc<dyn GeolocationProvider> {
    Arc::new(FixedGeolocation(BROWSER_FIX))
}

#[test]
fn test_decode_location_with_extras() {
    let message = BridgeMessage::decode(
        r#"{"name":"location","data":{"latitude":25.04,"longitude":121.51,"accuracy":8.5,"altitudeAccuracy":3.0}}"#,
    )
    .unwrap();
    let BridgeMessage::Location(coords) = message else {
        panic!("expected location, got {message:?}");
    };
    assert!((coords.latitude - 25.04).abs() < 1e-9);
    assert_eq!(coords.accuracy, Some(8.5));
    assert_eq!(coords.altitude_accuracy, Some(3.0));
    assert_eq!(coords.speed, None);
}

#[test]
fn test_decode_text_user_id() {
    let message =
        BridgeMessage::decode(r#"{"name":"userinfo","data":{"id":"u-17","email":"a@b.c"}}"#)
            .unwrap();
    let BridgeMessage::UserInfo(user) = message else {
        panic!("expected userinfo");
    };
    assert_eq!(user.id, UserId::Text("u-17".to_owned()));
    assert_eq!(user.email.as_deref(), Some("a@b.c"));
}

#[test]
fn test_decode_rejects_malformed_messages() {
    assert!(matches!(
        BridgeMessage::decode("not json"),
        Err(BridgeError::MalformedJson(_))
    ));
    assert_eq!(
        BridgeMessage::decode(r#"{"data":{"latitude":1.0,"longitude":2.0}}"#),
        Err(BridgeError::MissingName)
    );
    assert_eq!(
        BridgeMessage::decode(r#"{"name":"location","data":null}"#),
        Err(BridgeError::MissingData("location".to_owned()))
    );
    assert_eq!(
        BridgeMessage::decode(r#"{"name":"location"}"#),
        Err(BridgeError::MissingData("location".to_owned()))
    );
    assert_eq!(
        BridgeMessage::decode(r#"{"name":"weather","data":{}}"#),
        Err(BridgeError::UnknownMessage("weather".to_owned()))
    );
    assert!(matches!(
        BridgeMessage::decode(r#"{"name":"location","data":{"latitude":"north"}}"#),
        Err(BridgeError::InvalidPayload { .. })
    ));
}

#[test]
fn test_decode_rejects_out_of_range_coordinates() {
    let error =
        BridgeMessage::decode(r#"{"name":"location","data":{"latitude":91.0,"longitude":0.0}}"#)
            .unwrap_err();
    assert!(matches!(error, BridgeError::InvalidCoordinates { .. }));
    assert_eq!(AppError::from(error).code, ErrorCode::ValueOutOfRange);
}

#[test]
fn test_encoded_message_round_trips() {
    let encoded = serde_json::to_string(&BridgeMessage::Location(BROWSER_FIX)).unwrap();
    assert_eq!(
        BridgeMessage::decode(&encoded).unwrap(),
        BridgeMessage::Location(BROWSER_FIX)
    );
}

#[tokio::test(start_paused = true)]
async fn test_native_location_is_preferred() -> Result<()> {
    let shell = FakeShell::new(&[
        r#"{"name":"userinfo","data":{"id":1}}"#,
        "garbage",
        r#"{"name":"location","data":{"latitude":35.68,"longitude":139.76}}"#,
    ]);
    let native: Arc<dyn NativeBridge> = shell.clone();
    let resolver = LocationResolver::new(Some(native), browser());

    let resolved = resolver.resolve().await?;
    assert_eq!(resolved.source, LocationSource::Native);
    assert!((resolved.coords.latitude - 35.68).abs() < 1e-9);
    assert_eq!(shell.posted(), vec![BridgeRequest::Location.encode()]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_silent_shell_falls_back_to_browser() -> Result<()> {
    let shell: Arc<dyn NativeBridge> = FakeShell::new(&[]);
    let resolver = LocationResolver::new(Some(shell), browser());

    let started = tokio::time::Instant::now();
    let resolved = resolver.resolve().await?;
    assert_eq!(resolved.source, LocationSource::Browser);
    assert_eq!(resolved.coords, BROWSER_FIX);
    assert!(started.elapsed() >= Duration::from_millis(3000));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_invalid_native_coordinates_fall_back() -> Result<()> {
    let shell: Arc<dyn NativeBridge> =
        FakeShell::new(&[r#"{"name":"location","data":{"latitude":0.0,"longitude":500.0}}"#]);
    let resolver = LocationResolver::new(Some(shell), browser())
        .with_timeouts(Duration::from_millis(200), Duration::from_secs(1));

    let resolved = resolver.resolve().await?;
    assert_eq!(resolved.source, LocationSource::Browser);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_silent_geolocation_times_out() {
    let resolver = LocationResolver::new(None, Arc::new(SilentGeolocation));
    let error = resolver.resolve().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceTimeout);
}

#[tokio::test]
async fn test_geolocation_failure_is_reported() {
    let resolver = LocationResolver::new(None, Arc::new(DeniedGeolocation));
    let error = resolver.resolve().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

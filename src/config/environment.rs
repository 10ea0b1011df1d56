// ABOUTME: Environment configuration for the exercise runtime and CLI
// ABOUTME: Parses deployment mode, log level, engine overrides, and storage location
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use hand_chicken_core::config::{ConfigError, MotionEngineConfig};
use hand_chicken_core::constants::storage::DATA_DIR_NAME;
use hand_chicken_core::errors::AppResult;
use hand_chicken_core::models::Axis;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, Level};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Lifecycle events
    #[default]
    Info,
    /// Algorithm decisions
    Debug,
    /// Every sample
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Shipped build
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Motion engine configuration
    pub engine: MotionEngineConfig,
    /// Directory for the file-backed key-value store
    pub data_dir: PathBuf,
    /// Treat every location quest as in range
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: LogLevel::default(),
            engine: MotionEngineConfig::default(),
            data_dir: default_data_dir(),
            dev_mode: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Recognized variables: `ENVIRONMENT`, `RUST_LOG`, `HAND_CHICKEN_DATA_DIR`,
    /// `HAND_CHICKEN_DEV_MODE`, `HAND_CHICKEN_GRAVITY_ALPHA`,
    /// `HAND_CHICKEN_CALIBRATION_SECS`, `HAND_CHICKEN_MIN_WINDOW_SAMPLES`,
    /// `HAND_CHICKEN_VERTICAL_AXIS`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the resulting
    /// engine configuration is invalid
    pub fn from_env() -> AppResult<Self> {
        let defaults = MotionEngineConfig::default();
        let engine = MotionEngineConfig {
            gravity_alpha: parse_env("HAND_CHICKEN_GRAVITY_ALPHA", defaults.gravity_alpha)?,
            calibration_duration_secs: parse_env(
                "HAND_CHICKEN_CALIBRATION_SECS",
                defaults.calibration_duration_secs,
            )?,
            min_window_samples: parse_env(
                "HAND_CHICKEN_MIN_WINDOW_SAMPLES",
                defaults.min_window_samples,
            )?,
            vertical_axis: env::var("HAND_CHICKEN_VERTICAL_AXIS")
                .ok()
                .map(|raw| raw.parse::<Axis>().map_err(ConfigError::Parse))
                .transpose()?
                .unwrap_or(defaults.vertical_axis),
            ..defaults
        };
        engine.validate()?;

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            engine,
            data_dir: env::var("HAND_CHICKEN_DATA_DIR").map_or_else(|_| default_data_dir(), PathBuf::from),
            dev_mode: parse_env("HAND_CHICKEN_DEV_MODE", false)?,
        };

        info!(
            environment = %config.environment,
            data_dir = %config.data_dir.display(),
            dev_mode = config.dev_mode,
            "configuration loaded"
        );
        Ok(config)
    }
}

/// Platform data directory for hand-chicken, or the working directory when
/// the platform has none
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

/// Get environment variable or default value
#[must_use]
pub fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, using `default` when it is unset
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::Parse(format!("{key}={raw}: {e}"))),
        Err(_) => Ok(default),
    }
}

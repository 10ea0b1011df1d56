// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Default thresholds, engine tuning, storage keys, and reward formulas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat list. Everything tunable at runtime lives in
//! [`crate::config::DetectionThresholds`] or [`crate::config::MotionEngineConfig`];
//! the values here are only their defaults.

/// Default detection thresholds (linear acceleration in m/s², times in ms)
pub mod thresholds {
    /// Magnitude delta that counts as a step
    pub const STEP_THRESHOLD: f64 = 1.2;
    /// Minimum magnitude for a local maximum to count as a peak
    pub const MAG_PEAK_THRESHOLD: f64 = 1.0;
    /// Maximum magnitude a window must exceed to be considered a jump
    pub const JUMP_AMP_THRESHOLD: f64 = 12.0;
    /// Vertical peaks over magnitude peaks required for a jump
    pub const VERTICAL_PEAK_RATIO_FOR_JUMP: f64 = 0.6;
    /// Lower bound of the walking cadence band (Hz)
    pub const CADENCE_WALKING_MIN: f64 = 0.8;
    /// Upper bound of the walking cadence band (Hz)
    pub const CADENCE_WALKING_MAX: f64 = 2.5;
    /// Trailing window retained for feature computation
    pub const WINDOW_SIZE_MS: u64 = 2000;
    /// Classification timer period
    pub const FEATURE_COMPUTE_INTERVAL_MS: u64 = 700;
    /// Debounce between two accepted steps or peaks
    pub const MIN_STEP_INTERVAL_MS: u64 = 300;
    /// Walking requires the magnitude spread to stay below this
    pub const WALK_STD_CEILING: f64 = 4.5;
    /// Walking requires at least this many magnitude peaks
    pub const MIN_PEAKS_FOR_WALK: u32 = 2;
    /// Idle requires the maximum magnitude to stay below this
    pub const IDLE_MAX_CEILING: f64 = 1.2;
    /// Idle requires the magnitude spread to stay below this
    pub const IDLE_STD_CEILING: f64 = 0.6;
    /// Upper bound accepted for any time interval field (one day)
    pub const MAX_INTERVAL_MS: u64 = 86_400_000;
}

/// Motion engine tuning
pub mod engine {
    /// Low-pass smoothing factor for the gravity estimate
    pub const GRAVITY_ALPHA: f64 = 0.85;
    /// Fewer samples than this never produce a classification
    pub const MIN_WINDOW_SAMPLES: usize = 5;
    /// Lower bound for the window span used in cadence computation (seconds)
    pub const MIN_WINDOW_SECONDS: f64 = 0.001;
    /// Length of a calibration run
    pub const CALIBRATION_DURATION_SECS: u32 = 8;
    /// Spread multiplier for the adaptive calibration peak threshold
    pub const CALIBRATION_PEAK_K: f64 = 0.4;
    /// Floor applied to every recommended magnitude threshold
    pub const THRESHOLD_FLOOR: f64 = 0.3;
    /// Floor applied to the recommended walking cadence band
    pub const CADENCE_FLOOR: f64 = 0.5;
    /// Ceiling applied to the recommended walking cadence band
    pub const CADENCE_CEILING: f64 = 4.0;
    /// Half-width of the recommended cadence band around the measured cadence
    pub const CADENCE_BAND_HALF_WIDTH: f64 = 0.6;
    /// Spread multiplier for the recommended step threshold (walking)
    pub const WALK_STEP_K: f64 = 0.25;
    /// Spread multiplier for the recommended peak threshold (walking)
    pub const WALK_PEAK_K: f64 = 0.45;
    /// Spread multiplier for the recommended peak threshold (jumping)
    pub const JUMP_PEAK_K: f64 = 0.6;
    /// Fraction of the calibration maximum used as jump amplitude threshold
    pub const JUMP_AMP_FRACTION: f64 = 0.75;
    /// Motion events buffered between the sensor callback and the session loop
    pub const SAMPLE_CHANNEL_CAPACITY: usize = 256;
}

/// Durable key-value storage
pub mod storage {
    /// Fixed key under which detection thresholds are persisted
    pub const THRESHOLDS_KEY: &str = "hand_chicken.detection_thresholds";
    /// Directory name under the platform data dir
    pub const DATA_DIR_NAME: &str = "hand_chicken";
}

/// End-of-session reward formulas
pub mod rewards {
    /// Seconds of exercise per stamina point
    pub const SECONDS_PER_STAMINA: f64 = 10.0;
    /// Steps per satiety point
    pub const STEPS_PER_SATIETY: f64 = 20.0;
    /// Seconds of exercise per mood point
    pub const SECONDS_PER_MOOD: f64 = 15.0;
    /// Multiplier for sessions started in the early-bird window
    pub const EARLY_BIRD_MULTIPLIER: f64 = 1.15;
    /// First local hour of the early-bird window (inclusive)
    pub const EARLY_BIRD_START_HOUR: u32 = 6;
    /// Last local hour of the early-bird window (exclusive)
    pub const EARLY_BIRD_END_HOUR: u32 = 10;
    /// Multiplier for sessions completed while it is raining
    pub const RAIN_MULTIPLIER: f64 = 1.2;
    /// Daily exercise needed for the exercise quest
    pub const DAILY_EXERCISE_SECONDS_GOAL: u64 = 600;
    /// Daily steps needed for the walking quest
    pub const DAILY_STEPS_GOAL: u64 = 5000;
}

/// Location quests and native bridge
pub mod location {
    /// Mean earth radius used by the haversine distance
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
    /// Quest radius when the quest does not specify one
    pub const DEFAULT_QUEST_RADIUS_M: f64 = 100.0;
    /// How long to wait for the native shell before falling back
    pub const NATIVE_LOCATION_TIMEOUT_MS: u64 = 3000;
    /// How long to wait for browser geolocation
    pub const WEB_GPS_TIMEOUT_MS: u64 = 10_000;
}

// ABOUTME: Motion event and sample models for accelerometer ingestion
// ABOUTME: Converts platform readings into gravity-free, timestamped magnitude samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device axis in the sensor frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Lateral axis
    X,
    /// Longitudinal axis
    Y,
    /// Axis out of the screen
    #[default]
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            other => Err(format!("unknown axis '{other}'")),
        }
    }
}

/// Tri-axial acceleration in m/s²
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionVector {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl MotionVector {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector from its components
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.z.mul_add(self.z, self.x.mul_add(self.x, self.y * self.y)).sqrt()
    }

    /// Component along one device axis
    #[must_use]
    pub const fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// One acceleration reading as delivered by the platform.
///
/// Platforms may omit individual components; missing or non-finite
/// components read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccelerationReading {
    /// X component, if reported
    #[serde(default)]
    pub x: Option<f64>,
    /// Y component, if reported
    #[serde(default)]
    pub y: Option<f64>,
    /// Z component, if reported
    #[serde(default)]
    pub z: Option<f64>,
}

impl AccelerationReading {
    /// Reading with all three components present
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// Convert to a vector, zeroing missing or non-finite components
    #[must_use]
    pub fn to_vector(&self) -> MotionVector {
        let finite = |value: Option<f64>| value.filter(|v| v.is_finite()).unwrap_or(0.0);
        MotionVector::new(finite(self.x), finite(self.y), finite(self.z))
    }
}

/// Raw device-motion event.
///
/// `acceleration` is the platform's gravity-free reading; when present it is
/// preferred over `acceleration_including_gravity`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionEvent {
    /// Gravity-free acceleration, if the platform supplies it
    #[serde(default)]
    pub acceleration: Option<AccelerationReading>,
    /// Raw acceleration including gravity
    #[serde(default)]
    pub acceleration_including_gravity: Option<AccelerationReading>,
}

impl MotionEvent {
    /// Event carrying a gravity-free reading
    #[must_use]
    pub const fn linear(x: f64, y: f64, z: f64) -> Self {
        Self {
            acceleration: Some(AccelerationReading::new(x, y, z)),
            acceleration_including_gravity: None,
        }
    }

    /// Event carrying only a raw reading that still contains gravity
    #[must_use]
    pub const fn with_gravity(x: f64, y: f64, z: f64) -> Self {
        Self {
            acceleration: None,
            acceleration_including_gravity: Some(AccelerationReading::new(x, y, z)),
        }
    }
}

/// Timestamped linear-acceleration sample. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Arrival time in milliseconds
    pub timestamp: i64,
    /// Linear acceleration, x axis
    pub lin_ax: f64,
    /// Linear acceleration, y axis
    pub lin_ay: f64,
    /// Linear acceleration, z axis
    pub lin_az: f64,
    /// Euclidean norm of the three linear components
    pub magnitude: f64,
}

impl Sample {
    /// Build a sample from a linear-acceleration vector
    #[must_use]
    pub fn new(timestamp: i64, linear: MotionVector) -> Self {
        Self {
            timestamp,
            lin_ax: linear.x,
            lin_ay: linear.y,
            lin_az: linear.z,
            magnitude: linear.magnitude(),
        }
    }

    /// Linear acceleration as a vector
    #[must_use]
    pub const fn linear(&self) -> MotionVector {
        MotionVector::new(self.lin_ax, self.lin_ay, self.lin_az)
    }

    /// Absolute linear acceleration along one axis
    #[must_use]
    pub fn axis_magnitude(&self, axis: Axis) -> f64 {
        self.linear().component(axis).abs()
    }
}

// ABOUTME: Exponential low-pass gravity estimate and linear acceleration extraction
// ABOUTME: Bypassed when the platform already reports gravity-free acceleration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hand_chicken_core::models::{MotionEvent, MotionVector};

/// Separates gravity from raw accelerometer readings.
///
/// The estimate follows `g' = α·g + (1−α)·raw` and starts at zero, so it is
/// order-sensitive: readings must be fed in arrival order.
#[derive(Debug, Clone)]
pub struct GravitySeparator {
    alpha: f64,
    gravity: MotionVector,
}

impl GravitySeparator {
    /// Create a separator with the given smoothing factor
    #[must_use]
    pub const fn new(alpha: f64) -> Self {
        Self {
            alpha,
            gravity: MotionVector::ZERO,
        }
    }

    /// Current gravity estimate
    #[must_use]
    pub const fn gravity(&self) -> MotionVector {
        self.gravity
    }

    /// Reset the estimate to zero for a new session
    pub fn reset(&mut self) {
        self.gravity = MotionVector::ZERO;
    }

    /// Update the estimate with a raw reading and return `raw − gravity`
    pub fn separate(&mut self, raw: MotionVector) -> MotionVector {
        let keep = self.alpha;
        let take = 1.0 - self.alpha;
        self.gravity = MotionVector::new(
            keep.mul_add(self.gravity.x, take * raw.x),
            keep.mul_add(self.gravity.y, take * raw.y),
            keep.mul_add(self.gravity.z, take * raw.z),
        );
        MotionVector::new(
            raw.x - self.gravity.x,
            raw.y - self.gravity.y,
            raw.z - self.gravity.z,
        )
    }

    /// Linear acceleration for one motion event.
    ///
    /// Prefers the platform's gravity-free reading and leaves the estimate
    /// untouched in that case. Returns `None` when the event carries neither
    /// field.
    pub fn linear_acceleration(&mut self, event: &MotionEvent) -> Option<MotionVector> {
        if let Some(linear) = event.acceleration {
            return Some(linear.to_vector());
        }
        event
            .acceleration_including_gravity
            .map(|raw| self.separate(raw.to_vector()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_chicken_core::models::AccelerationReading;

    #[test]
    fn test_first_reading_keeps_most_of_the_signal() {
        let mut separator = GravitySeparator::new(0.85);
        let linear = separator.separate(MotionVector::new(0.0, 0.0, 10.0));
        assert!((separator.gravity().z - 1.5).abs() < 1e-9);
        assert!((linear.z - 8.5).abs() < 1e-9);
    }

    #[test]
    fn test_constant_gravity_converges_to_zero_linear() {
        let mut separator = GravitySeparator::new(0.85);
        let mut linear = MotionVector::ZERO;
        for _ in 0..200 {
            linear = separator.separate(MotionVector::new(0.0, 9.81, 0.0));
        }
        assert!(linear.magnitude() < 1e-6);
        assert!((separator.gravity().y - 9.81).abs() < 1e-6);
    }

    #[test]
    fn test_gravity_free_field_bypasses_filter() {
        let mut separator = GravitySeparator::new(0.85);
        let event = MotionEvent {
            acceleration: Some(AccelerationReading::new(1.0, 2.0, 3.0)),
            acceleration_including_gravity: Some(AccelerationReading::new(1.0, 11.8, 3.0)),
        };
        let linear = separator.linear_acceleration(&event).unwrap();
        assert_eq!(linear, MotionVector::new(1.0, 2.0, 3.0));
        assert_eq!(separator.gravity(), MotionVector::ZERO);
    }

    #[test]
    fn test_event_without_readings_is_skipped() {
        let mut separator = GravitySeparator::new(0.85);
        assert!(separator
            .linear_acceleration(&MotionEvent::default())
            .is_none());
    }
}

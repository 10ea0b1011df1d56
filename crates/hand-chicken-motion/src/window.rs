// ABOUTME: Trailing time-bounded buffer of linear-acceleration samples
// ABOUTME: Drops samples at or beyond the window age on every trim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hand_chicken_core::models::Sample;
use std::collections::VecDeque;

/// Chronological buffer of the most recent samples.
///
/// Insertion order is chronological order. After `trim(now, size)` every
/// retained sample satisfies `now - timestamp < size`.
#[derive(Debug, Clone, Default)]
pub struct SlidingWindow {
    samples: VecDeque<Sample>,
}

impl SlidingWindow {
    /// Create an empty window
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample
    pub fn insert(&mut self, sample: Sample) {
        self.samples.push_back(sample);
    }

    /// Remove samples older than the window and return the survivors
    pub fn trim(&mut self, now_ms: i64, window_size_ms: u64) -> &[Sample] {
        let window = i64::try_from(window_size_ms).unwrap_or(i64::MAX);
        while self
            .samples
            .front()
            .is_some_and(|oldest| now_ms.saturating_sub(oldest.timestamp) >= window)
        {
            self.samples.pop_front();
        }
        self.samples.make_contiguous()
    }

    /// Number of retained samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop every sample
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Iterate over retained samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

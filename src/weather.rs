// ABOUTME: Shared weather state with a manual rain override observable by every screen
// ABOUTME: Explicit cloneable store over a watch channel instead of module-level globals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Weather flags shared across the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeatherState {
    /// Rain reported by the weather lookup
    pub reported_rain: bool,
    /// Rain forced on from the settings surface
    pub manual_rain: bool,
}

impl WeatherState {
    /// Whether either source says it is raining
    #[must_use]
    pub const fn is_raining(&self) -> bool {
        self.reported_rain || self.manual_rain
    }
}

/// Cloneable weather store; all clones observe the same state
#[derive(Debug, Clone)]
pub struct WeatherStore {
    tx: Arc<watch::Sender<WeatherState>>,
}

impl Default for WeatherStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherStore {
    /// Store with no rain
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(WeatherState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Force rain on or off; listeners are only woken on a change
    pub fn set_manual_rain(&self, raining: bool) {
        let changed = self.tx.send_if_modified(|state| {
            let changed = state.manual_rain != raining;
            state.manual_rain = raining;
            changed
        });
        if changed {
            info!(raining, "manual rain toggled");
        }
    }

    /// Record the outcome of a weather lookup
    pub fn set_reported_rain(&self, raining: bool) {
        self.tx.send_if_modified(|state| {
            let changed = state.reported_rain != raining;
            state.reported_rain = raining;
            changed
        });
    }

    /// Whether the manual override is on
    #[must_use]
    pub fn manual_rain(&self) -> bool {
        self.tx.borrow().manual_rain
    }

    /// Whether it is raining from either source
    #[must_use]
    pub fn is_raining(&self) -> bool {
        self.tx.borrow().is_raining()
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> WeatherState {
        *self.tx.borrow()
    }

    /// Receiver notified on every change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.tx.subscribe()
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Timestamps are wall-clock epoch milliseconds because cooldown records
//! must stay comparable across process restarts.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A clock that provides the current wall-clock time
pub trait Clock: Clone + Send + Sync + 'static {
    /// Milliseconds since the Unix epoch
    fn epoch_ms(&self) -> u64;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_ms(&self) -> u64 {
        // Pre-epoch system time is clamped to zero
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone, Debug)]
pub struct FakeClock {
    current: Arc<Mutex<u64>>,
}

impl FakeClock {
    /// Create a fake clock starting at the given epoch milliseconds
    pub fn at(epoch_ms: u64) -> Self {
        Self {
            current: Arc::new(Mutex::new(epoch_ms)),
        }
    }

    pub fn new() -> Self {
        Self::at(1_700_000_000_000)
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = current.saturating_add(duration_ms(duration));
    }

    /// Set the clock to a specific epoch millisecond
    pub fn set(&self, epoch_ms: u64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = epoch_ms;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn epoch_ms(&self) -> u64 {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Whole milliseconds in a duration, saturating at `u64::MAX`
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Schedules are expressed in local wall-clock time (a daily backup at
//! `02:30` means 02:30 on the host's clock), so the clock exposes both a
//! monotonic instant for elapsed-time measurement and a local
//! [`NaiveDateTime`] for trigger and eligibility decisions.

use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    fn local_now(&self) -> NaiveDateTime;

    /// Today's local date.
    fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
    local: Arc<Mutex<NaiveDateTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
            local: Arc::new(Mutex::new(NaiveDateTime::default())),
        }
    }

    /// Create a fake clock reading the given local wall-clock time
    pub fn at(local: NaiveDateTime) -> Self {
        let clock = Self::new();
        clock.set_local(local);
        clock
    }

    /// Advance both the monotonic and wall clocks by the given duration
    pub fn advance(&self, duration: Duration) {
        *self.current.lock() += duration;
        let delta = chrono::Duration::milliseconds(duration.as_millis() as i64);
        let mut local = self.local.lock();
        *local += delta;
    }

    /// Set the local wall-clock time
    pub fn set_local(&self, local: NaiveDateTime) {
        *self.local.lock() = local;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }

    fn local_now(&self) -> NaiveDateTime {
        *self.local.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;

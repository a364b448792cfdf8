// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Policy, TimeOfDay};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core types.
pub mod strategies {
    use crate::BackupClass;
    use proptest::prelude::*;

    pub fn arb_class() -> impl Strategy<Value = BackupClass> {
        prop_oneof![
            Just(BackupClass::Daily),
            Just(BackupClass::Weekly),
            Just(BackupClass::Monthly),
            Just(BackupClass::Startup),
        ]
    }

    /// Histories of distinct artifact names, oldest first.
    pub fn arb_history(max_len: usize) -> impl Strategy<Value = Vec<String>> {
        (0..=max_len).prop_map(|len| (0..len).map(|i| format!("artifact-{i:04}.zip")).collect())
    }

    pub fn arb_retention() -> impl Strategy<Value = u32> {
        prop_oneof![Just(0u32), 1u32..5, 5u32..64]
    }
}

// ── Date helpers ────────────────────────────────────────────────────────

/// A calendar date. Invalid dates collapse to the epoch date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// A local wall-clock time on the minute.
pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    local_hms(year, month, day, hour, minute, 0)
}

/// A local wall-clock time with seconds.
pub fn local_hms(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default();
    date(year, month, day).and_time(time)
}

/// A time of day. Invalid values collapse to midnight.
pub fn at(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap_or(TimeOfDay::MIDNIGHT)
}

// ── Policy factories ────────────────────────────────────────────────────

/// An enabled policy firing at `time`.
pub fn scheduled(time: TimeOfDay) -> Policy {
    Policy::builder().time_of_day(time).build()
}


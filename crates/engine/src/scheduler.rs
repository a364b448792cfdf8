// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock trigger table.
//!
//! Each armed trigger fires once per day at a local time of day. Nothing here
//! sleeps; the pump calls [`Scheduler::fired_triggers`] on every tick, so the
//! precision of a trigger is one pump interval.

use bsched_core::{TimeOfDay, TriggerId};
use chrono::{Days, NaiveDateTime};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Trigger {
    at: TimeOfDay,
    next_fire: NaiveDateTime,
}

/// Armed daily triggers keyed by id.
#[derive(Debug, Default)]
pub struct Scheduler {
    triggers: BTreeMap<TriggerId, Trigger>,
}

/// First occurrence of `at` strictly after `after`.
pub fn next_occurrence(at: TimeOfDay, after: NaiveDateTime) -> NaiveDateTime {
    let today = after.date().and_time(at.to_naive_time());
    if today > after {
        return today;
    }
    // Past NaiveDate::MAX there is no tomorrow; keep the trigger at today.
    after.date().checked_add_days(Days::new(1)).map_or(today, |d| d.and_time(at.to_naive_time()))
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) a daily trigger at `at`, first firing after `now`.
    pub fn set_trigger(&mut self, id: TriggerId, at: TimeOfDay, now: NaiveDateTime) {
        let next_fire = next_occurrence(at, now);
        tracing::debug!(trigger = %id, %next_fire, "trigger armed");
        self.triggers.insert(id, Trigger { at, next_fire });
    }

    /// Cancel every trigger carrying `tag`. Returns how many were removed.
    pub fn cancel_tagged(&mut self, tag: &str) -> usize {
        let before = self.triggers.len();
        self.triggers.retain(|id, _| !id.has_tag(tag));
        before - self.triggers.len()
    }

    /// Collect triggers due at `now`, re-arming each for its next day.
    ///
    /// A trigger whose fire time passed several times while nobody ticked
    /// still fires once.
    pub fn fired_triggers(&mut self, now: NaiveDateTime) -> Vec<TriggerId> {
        let mut fired = Vec::new();
        for (id, trigger) in self.triggers.iter_mut() {
            if trigger.next_fire <= now {
                trigger.next_fire = next_occurrence(trigger.at, now);
                fired.push(id.clone());
            }
        }
        fired
    }

    pub fn next_fire(&self, id: &str) -> Option<NaiveDateTime> {
        self.triggers.get(id).map(|t| t.next_fire)
    }

    /// Ids of all armed triggers, in id order
    pub fn armed(&self) -> Vec<TriggerId> {
        self.triggers.keys().cloned().collect()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

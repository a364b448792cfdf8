// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime tests

mod deferral;
mod events;
mod run;
mod schedule;

use super::*;
use crate::test_helpers::{setup_at, setup_with_config};
use bsched_adapters::{BackupCall, NotifyKind};
use bsched_core::test_support::{at, local, scheduled};
use bsched_core::{Event, Exclusion, OperationOutcome, Policy};

/// Sunday 2026-03-15, 02:00.
fn sunday_morning() -> chrono::NaiveDateTime {
    local(2026, 3, 15, 2, 0)
}

fn expect_completed(outcome: &RunOutcome) -> &CompletedRun {
    match outcome.completed() {
        Some(run) => run,
        None => panic!("expected completed run, got {outcome}: {outcome:?}"),
    }
}

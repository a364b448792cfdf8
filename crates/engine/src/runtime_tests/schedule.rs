// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger arming, pump, and shutdown tests.

use super::*;
use bsched_core::{PeriodicPolicies, TriggerId};
use std::time::Duration;

fn policies(daily: Option<Policy>, weekly: Option<Policy>, monthly: Option<Policy>) -> PeriodicPolicies {
    PeriodicPolicies {
        daily: daily.unwrap_or_default(),
        weekly: weekly.unwrap_or_default(),
        monthly: monthly.unwrap_or_default(),
    }
}

// =============================================================================
// Arming
// =============================================================================

#[tokio::test]
async fn reconfigure_arms_only_enabled_timed_policies() {
    let ctx = setup_at(sunday_morning());
    let untimed = Policy { time_of_day: None, ..scheduled(at(0, 0)) };
    let disabled = Policy { enabled: false, ..scheduled(at(5, 0)) };

    let armed = ctx.runtime.reconfigure(policies(Some(scheduled(at(2, 30))), Some(untimed), Some(disabled)));

    assert_eq!(armed, 1);
    assert_eq!(ctx.runtime.armed_triggers(), vec![TriggerId::backup(BackupClass::Daily)]);
    assert_eq!(ctx.runtime.next_fire(BackupClass::Daily), Some(local(2026, 3, 15, 2, 30)));
    assert!(ctx.runtime.is_pump_running());
}

#[tokio::test]
async fn time_already_passed_today_fires_tomorrow() {
    let ctx = setup_at(sunday_morning());
    ctx.runtime.reconfigure(policies(None, Some(scheduled(at(1, 0))), Some(scheduled(at(2, 0)))));

    assert_eq!(ctx.runtime.next_fire(BackupClass::Weekly), Some(local(2026, 3, 16, 1, 0)));
    assert_eq!(ctx.runtime.next_fire(BackupClass::Monthly), Some(local(2026, 3, 16, 2, 0)));
}

#[tokio::test]
async fn reconfigure_twice_leaves_nothing_from_first_call() {
    let ctx = setup_at(sunday_morning());
    ctx.runtime.reconfigure(policies(Some(scheduled(at(3, 0))), Some(scheduled(at(4, 0))), None));

    ctx.runtime.reconfigure(policies(None, None, Some(scheduled(at(5, 0)))));

    assert_eq!(ctx.runtime.armed_triggers(), vec![TriggerId::backup(BackupClass::Monthly)]);
    assert_eq!(ctx.runtime.next_fire(BackupClass::Daily), None);
}

#[tokio::test]
async fn nothing_scheduled_arms_nothing_and_starts_no_pump() {
    let ctx = setup_at(sunday_morning());

    let armed = ctx.runtime.reconfigure(PeriodicPolicies::default());

    assert_eq!(armed, 0);
    assert!(ctx.runtime.armed_triggers().is_empty());
    assert!(!ctx.runtime.is_pump_running());
    assert_eq!(ctx.runtime.snapshot(), Some(PeriodicPolicies::default()));
}

#[test]
fn reconfigure_outside_async_runtime_arms_without_pump() {
    let ctx = setup_at(sunday_morning());

    let armed = ctx.runtime.reconfigure(policies(Some(scheduled(at(3, 0))), None, None));

    assert_eq!(armed, 1);
    assert!(!ctx.runtime.is_pump_running());
}

// =============================================================================
// Ticking
// =============================================================================

#[tokio::test]
async fn tick_runs_due_classes_and_rearms_for_tomorrow() {
    let ctx = setup_at(local(2026, 3, 15, 1, 0));
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.runtime.reconfigure(ctx.runtime.read_policies());

    assert!(ctx.runtime.tick().await.is_empty());

    ctx.clock.set_local(local(2026, 3, 15, 2, 0));
    let outcomes = ctx.runtime.tick().await;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].0, BackupClass::Daily);
    assert!(outcomes[0].1.is_completed());
    assert_eq!(ctx.runtime.next_fire(BackupClass::Daily), Some(local(2026, 3, 16, 2, 0)));
    assert!(ctx.runtime.tick().await.is_empty());
}

#[tokio::test]
async fn due_trigger_for_ineligible_day_is_skipped() {
    // Sunday; the weekly policy wants Monday.
    let ctx = setup_at(local(2026, 3, 15, 1, 0));
    ctx.enable(BackupClass::Weekly, Policy { weekday: 1, ..scheduled(at(2, 0)) });
    ctx.runtime.reconfigure(ctx.runtime.read_policies());

    ctx.clock.set_local(local(2026, 3, 15, 2, 0));
    let outcomes = ctx.runtime.tick().await;

    assert!(matches!(outcomes[0].1, RunOutcome::Skipped(_)));
    assert!(ctx.backups.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn pump_runs_due_triggers_on_its_interval() {
    let ctx = setup_at(local(2026, 3, 15, 1, 59));
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.runtime.reconfigure(ctx.runtime.read_policies());
    ctx.settle().await;
    assert!(ctx.backups.calls().is_empty());

    ctx.clock.advance(Duration::from_secs(60));
    tokio::time::advance(Duration::from_secs(60)).await;
    ctx.settle().await;

    assert_eq!(ctx.backups.created(), vec!["octoprint-daily-20260315-020000.zip"]);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_pump_and_disarms() {
    let ctx = setup_at(local(2026, 3, 15, 1, 59));
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.runtime.reconfigure(ctx.runtime.read_policies());
    assert!(ctx.runtime.is_pump_running());

    ctx.runtime.shutdown().await;

    assert!(!ctx.runtime.is_pump_running());
    assert!(ctx.runtime.armed_triggers().is_empty());

    // Re-arming after shutdown does not restart the pump.
    ctx.runtime.reconfigure(ctx.runtime.read_policies());
    assert!(!ctx.runtime.is_pump_running());
    ctx.clock.advance(Duration::from_secs(120));
    tokio::time::advance(Duration::from_secs(120)).await;
    ctx.settle().await;
    assert!(ctx.backups.calls().is_empty());
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host event handling: startup, configuration changes, manual runs.

use super::*;
use std::time::Duration;

// =============================================================================
// Startup
// =============================================================================

#[tokio::test(start_paused = true)]
async fn startup_arms_triggers_from_store() {
    let ctx = setup_at(local(2026, 3, 15, 1, 0));
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.enable(BackupClass::Monthly, Policy { day_of_month: 20, ..scheduled(at(3, 0)) });

    let outcomes = ctx.runtime.handle_event(Event::Startup).await;

    assert!(outcomes.is_empty());
    assert_eq!(ctx.runtime.armed_triggers().len(), 2);
    assert_eq!(ctx.runtime.next_fire(BackupClass::Monthly), Some(local(2026, 3, 15, 3, 0)));
    assert_eq!(ctx.runtime.snapshot(), Some(ctx.runtime.read_policies()));
}

#[tokio::test(start_paused = true)]
async fn startup_backup_runs_after_delay() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Startup, Policy::default());

    ctx.runtime.handle_event(Event::Startup).await;
    ctx.settle().await;
    assert!(ctx.backups.calls().is_empty());

    tokio::time::advance(Duration::from_millis(1_001)).await;
    ctx.settle().await;

    assert_eq!(ctx.backups.created(), vec!["octoprint-startup-20260315-020000.zip"]);
    assert_eq!(ctx.store.saved_history(BackupClass::Startup).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn disabled_startup_backup_does_nothing() {
    let ctx = setup_at(sunday_morning());

    ctx.runtime.handle_event(Event::Startup).await;
    ctx.settle().await;
    tokio::time::advance(Duration::from_secs(2)).await;
    ctx.settle().await;

    assert!(ctx.backups.calls().is_empty());
    assert!(ctx.notifier.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn startup_during_print_defers_startup_backup() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Startup, Policy::default());
    ctx.activity.set_printing(true);

    ctx.runtime.handle_event(Event::Startup).await;
    ctx.settle().await;
    tokio::time::advance(Duration::from_millis(1_001)).await;
    ctx.settle().await;
    assert!(ctx.runtime.pending().contains(BackupClass::Startup));

    ctx.activity.set_printing(false);
    let outcomes = ctx
        .runtime
        .handle_event(Event::ProtectedOperationEnded { outcome: OperationOutcome::Done })
        .await;
    assert!(outcomes[0].1.is_completed());
}

#[tokio::test(start_paused = true)]
async fn shutdown_before_delay_cancels_startup_backup() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Startup, Policy::default());

    ctx.runtime.handle_event(Event::Startup).await;
    ctx.settle().await;
    ctx.runtime.shutdown().await;
    tokio::time::advance(Duration::from_secs(2)).await;
    ctx.settle().await;

    assert!(ctx.backups.calls().is_empty());
}

// =============================================================================
// Configuration changes
// =============================================================================

#[tokio::test]
async fn unchanged_configuration_keeps_existing_triggers() {
    let ctx = setup_at(local(2026, 3, 15, 1, 0));
    ctx.enable(BackupClass::Daily, scheduled(at(2, 30)));
    ctx.runtime.handle_event(Event::Startup).await;

    // Moving past the fire time would change the next fire if re-armed.
    ctx.clock.set_local(local(2026, 3, 15, 3, 0));
    ctx.runtime.handle_event(Event::ConfigurationChanged).await;

    assert_eq!(ctx.runtime.next_fire(BackupClass::Daily), Some(local(2026, 3, 15, 2, 30)));
}

#[tokio::test]
async fn changed_configuration_rearms() {
    let ctx = setup_at(local(2026, 3, 15, 1, 0));
    ctx.enable(BackupClass::Daily, scheduled(at(2, 30)));
    ctx.runtime.handle_event(Event::Startup).await;

    ctx.enable(BackupClass::Daily, scheduled(at(4, 0)));
    ctx.enable(BackupClass::Weekly, scheduled(at(5, 0)));
    ctx.runtime.handle_event(Event::ConfigurationChanged).await;

    assert_eq!(ctx.runtime.next_fire(BackupClass::Daily), Some(local(2026, 3, 15, 4, 0)));
    assert_eq!(ctx.runtime.next_fire(BackupClass::Weekly), Some(local(2026, 3, 15, 5, 0)));
    assert_eq!(ctx.runtime.snapshot(), Some(ctx.runtime.read_policies()));
}

#[tokio::test]
async fn retention_change_counts_as_configuration_change() {
    let ctx = setup_at(local(2026, 3, 15, 1, 0));
    ctx.enable(BackupClass::Weekly, scheduled(at(2, 30)));
    ctx.runtime.handle_event(Event::Startup).await;

    ctx.enable(BackupClass::Weekly, Policy { retention: 5, ..scheduled(at(2, 30)) });
    ctx.runtime.handle_event(Event::ConfigurationChanged).await;

    assert_eq!(ctx.runtime.snapshot().map(|s| s.weekly.retention), Some(5));
}

#[tokio::test]
async fn disabling_every_class_disarms_all() {
    let ctx = setup_at(local(2026, 3, 15, 1, 0));
    ctx.enable(BackupClass::Daily, scheduled(at(2, 30)));
    ctx.runtime.handle_event(Event::Startup).await;

    ctx.store.set_policy(BackupClass::Daily, Policy::default());
    ctx.runtime.handle_event(Event::ConfigurationChanged).await;

    assert!(ctx.runtime.armed_triggers().is_empty());
}

// =============================================================================
// Manual runs
// =============================================================================

#[tokio::test]
async fn run_requested_runs_immediately() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(23, 0)));

    let outcomes = ctx.runtime.handle_event(Event::RunRequested { class: BackupClass::Daily }).await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].1.is_completed());
    assert_eq!(ctx.backups.created(), vec!["octoprint-daily-20260315-020000.zip"]);
}

#[tokio::test]
async fn run_requested_respects_print_gate() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(23, 0)));
    ctx.activity.set_printing(true);

    let outcomes = ctx.runtime.handle_event(Event::RunRequested { class: BackupClass::Daily }).await;

    assert!(matches!(outcomes[0].1, RunOutcome::Deferred));
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator tests: eligibility, creation, retention, failure handling.

use super::*;
use crate::error::RuntimeError;
use bsched_adapters::{BackupError, StoreError};
use bsched_core::{Eligibility, NotificationSettings};
use std::sync::Arc;
use yare::parameterized;

// =============================================================================
// Creation and history
// =============================================================================

#[tokio::test]
async fn daily_run_creates_named_backup_and_records_history() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));

    let outcome = ctx.runtime.run(BackupClass::Daily).await;

    let run = expect_completed(&outcome);
    assert_eq!(run.filename, "octoprint-daily-20260315-020000.zip");
    assert!(run.deleted.is_empty());
    assert_eq!(ctx.backups.created(), vec![run.filename.clone()]);
    assert_eq!(ctx.store.saved_history(BackupClass::Daily), vec![run.filename.clone()]);
    assert_eq!(ctx.store.saves(), 1);
}

#[tokio::test]
async fn success_notification_is_transient_info() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));

    ctx.runtime.run(BackupClass::Daily).await;

    let calls = ctx.notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, NotifyKind::Info);
    assert!(!calls[0].retain);
    assert!(calls[0].message.contains("octoprint-daily-20260315-020000.zip"));
}

#[parameterized(
    configured = { Some("voron"), "voron-startup-20260315-020000.zip" },
    blank = { Some("   "), "octoprint-startup-20260315-020000.zip" },
    unset = { None, "octoprint-startup-20260315-020000.zip" },
)]
#[test_macro(tokio::test)]
async fn filename_uses_instance_name(instance: Option<&str>, expected: &str) {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Startup, Policy::default());
    ctx.store.set_instance_name(instance);

    let outcome = ctx.runtime.run(BackupClass::Startup).await;
    assert_eq!(expect_completed(&outcome).filename, expected);
}

#[tokio::test]
async fn configured_fallback_instance_name_is_used() {
    let config = RuntimeConfig::default().default_instance_name("farm");
    let ctx = setup_with_config(sunday_morning(), config);
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));

    let outcome = ctx.runtime.run(BackupClass::Daily).await;
    assert_eq!(expect_completed(&outcome).filename, "farm-daily-20260315-020000.zip");
}

#[tokio::test]
async fn exclusions_follow_policy_flags() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(
        BackupClass::Daily,
        Policy { exclude_uploads: true, exclude_timelapse: true, ..scheduled(at(2, 0)) },
    );

    ctx.runtime.run(BackupClass::Daily).await;

    assert_eq!(
        ctx.backups.calls()[0],
        BackupCall::Create {
            exclude: vec![Exclusion::Uploads, Exclusion::Timelapse],
            filename: "octoprint-daily-20260315-020000.zip".to_string(),
        }
    );
}

// =============================================================================
// Retention
// =============================================================================

#[tokio::test]
async fn retention_keeps_newest_and_deletes_the_rest() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, Policy { retention: 2, ..scheduled(at(2, 0)) });
    ctx.store.seed_history(BackupClass::Daily, ["i1", "i2", "i3"]);
    ctx.backups.seed_archives(["i1", "i2", "i3"]);

    let outcome = ctx.runtime.run(BackupClass::Daily).await;

    let run = expect_completed(&outcome);
    assert_eq!(run.deleted, vec!["i1", "i2"]);
    assert_eq!(ctx.backups.deleted(), vec!["i1", "i2"]);
    assert_eq!(ctx.store.saved_history(BackupClass::Daily), vec!["i3".to_string(), run.filename.clone()]);
    assert_eq!(ctx.backups.archives(), vec!["i3".to_string(), run.filename.clone()]);
}

#[tokio::test]
async fn zero_retention_deletes_everything_including_new_backup() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, Policy { retention: 0, ..scheduled(at(2, 0)) });
    ctx.store.seed_history(BackupClass::Daily, ["i1", "i2", "i3"]);

    let outcome = ctx.runtime.run(BackupClass::Daily).await;

    let run = expect_completed(&outcome);
    assert_eq!(run.deleted.len(), 4);
    assert_eq!(run.deleted.last(), Some(&run.filename));
    assert!(ctx.store.saved_history(BackupClass::Daily).is_empty());
}

#[tokio::test]
async fn failed_deletion_is_skipped_and_history_still_trimmed() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, Policy { retention: 1, ..scheduled(at(2, 0)) });
    ctx.store.seed_history(BackupClass::Daily, ["a", "b", "c"]);
    ctx.backups.seed_archives(["a", "b", "c"]);
    ctx.backups.fail_delete_of("b");

    let outcome = ctx.runtime.run(BackupClass::Daily).await;

    let run = expect_completed(&outcome);
    assert_eq!(ctx.backups.deleted(), vec!["a", "b", "c"]);
    assert_eq!(ctx.store.saved_history(BackupClass::Daily), vec![run.filename.clone()]);
    // The artifact that could not be deleted is orphaned on disk.
    assert_eq!(ctx.backups.archives(), vec!["b".to_string(), run.filename.clone()]);
    assert!(ctx.notifier.messages(NotifyKind::Error).is_empty());
}

#[tokio::test]
async fn histories_are_independent_per_class() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.enable(BackupClass::Startup, Policy::default());
    ctx.store.seed_history(BackupClass::Startup, ["s1"]);

    ctx.runtime.run(BackupClass::Daily).await;

    assert_eq!(ctx.store.saved_history(BackupClass::Startup), vec!["s1"]);
    assert!(ctx.backups.deleted().is_empty());
}

// =============================================================================
// Eligibility
// =============================================================================

#[parameterized(
    on_the_fifteenth = { 15, true },
    on_the_sixteenth = { 16, false },
)]
#[test_macro(tokio::test)]
async fn monthly_runs_only_on_its_day(day: u32, runs: bool) {
    let ctx = setup_at(local(2026, 3, day, 2, 0));
    ctx.enable(BackupClass::Monthly, Policy { day_of_month: 15, ..scheduled(at(2, 0)) });
    ctx.store.seed_history(BackupClass::Monthly, ["m0"]);

    let outcome = ctx.runtime.run(BackupClass::Monthly).await;

    assert_eq!(outcome.is_completed(), runs);
    if !runs {
        assert!(matches!(outcome, RunOutcome::Skipped(Eligibility::WrongDay)));
        assert!(ctx.backups.calls().is_empty());
        assert_eq!(ctx.store.history(BackupClass::Monthly), vec!["m0"]);
        assert_eq!(ctx.store.saves(), 0);
    }
}

#[tokio::test]
async fn weekly_policy_with_impossible_weekday_never_runs() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Weekly, Policy { weekday: 0, ..scheduled(at(2, 0)) });

    let outcome = ctx.runtime.run(BackupClass::Weekly).await;

    assert!(matches!(outcome, RunOutcome::Skipped(Eligibility::InvalidDay)));
    assert!(ctx.backups.calls().is_empty());
    assert!(ctx.notifier.calls().is_empty());
}

#[parameterized(
    sunday = { 15, 7, true },
    monday_policy_on_sunday = { 15, 1, false },
    monday = { 16, 1, true },
)]
#[test_macro(tokio::test)]
async fn weekly_runs_only_on_its_weekday(day: u32, weekday: u32, runs: bool) {
    let ctx = setup_at(local(2026, 3, day, 2, 0));
    ctx.enable(BackupClass::Weekly, Policy { weekday, ..scheduled(at(2, 0)) });

    let outcome = ctx.runtime.run(BackupClass::Weekly).await;
    assert_eq!(outcome.is_completed(), runs);
}

#[parameterized(
    daily = { BackupClass::Daily },
    weekly = { BackupClass::Weekly },
    monthly = { BackupClass::Monthly },
    startup = { BackupClass::Startup },
)]
#[test_macro(tokio::test)]
async fn disabled_class_is_skipped_silently(class: BackupClass) {
    let ctx = setup_at(sunday_morning());

    let outcome = ctx.runtime.run(class).await;

    assert!(matches!(outcome, RunOutcome::Skipped(Eligibility::Disabled)));
    assert!(ctx.backups.calls().is_empty());
    assert!(ctx.notifier.calls().is_empty());
}

#[tokio::test]
async fn overlapping_run_of_same_class_is_busy() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.enable(BackupClass::Startup, Policy::default());
    let gate = ctx.backups.pause_create();

    let runtime = Arc::clone(&ctx.runtime);
    let first = tokio::spawn(async move { runtime.run(BackupClass::Daily).await });
    ctx.settle().await;
    assert!(ctx.runtime.is_in_flight(BackupClass::Daily));

    assert!(matches!(ctx.runtime.run(BackupClass::Daily).await, RunOutcome::Busy));
    // The rejected run must not clear the first run's marker.
    assert!(ctx.runtime.is_in_flight(BackupClass::Daily));

    gate.notify_one();
    let outcome = first.await.unwrap();
    assert_eq!(expect_completed(&outcome).filename, "octoprint-daily-20260315-020000.zip");
    assert_eq!(ctx.backups.created().len(), 1);
    assert!(!ctx.runtime.is_in_flight(BackupClass::Daily));

    // Other classes and later runs are not blocked by the collision.
    gate.notify_one();
    assert!(ctx.runtime.run(BackupClass::Startup).await.is_completed());
    gate.notify_one();
    assert!(ctx.runtime.run(BackupClass::Daily).await.is_completed());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn creation_failure_leaves_history_and_reports_retained_error() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, Policy { retention: 1, ..scheduled(at(2, 0)) });
    ctx.store.seed_history(BackupClass::Daily, ["old"]);
    ctx.backups.set_fail_create(true);

    let outcome = ctx.runtime.run(BackupClass::Daily).await;

    assert!(matches!(outcome, RunOutcome::Failed(RuntimeError::Backup(BackupError::CreateFailed(_)))));
    assert!(ctx.backups.deleted().is_empty());
    assert_eq!(ctx.store.history(BackupClass::Daily), vec!["old"]);
    assert_eq!(ctx.store.saves(), 0);

    let calls = ctx.notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, NotifyKind::Error);
    assert!(calls[0].retain);
    assert!(!ctx.runtime.is_in_flight(BackupClass::Daily));
}

#[tokio::test]
async fn missing_destination_fails_before_creation() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.backups.set_destination_missing(true);

    let outcome = ctx.runtime.run(BackupClass::Daily).await;

    assert!(matches!(outcome, RunOutcome::Failed(RuntimeError::DestinationMissing)));
    assert!(ctx.backups.calls().is_empty());
    assert_eq!(
        ctx.notifier.messages(NotifyKind::Error),
        vec!["Backup failed as the mount was missing!"]
    );
}

#[tokio::test]
async fn save_failure_is_reported_as_failed_run() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, Policy { retention: 1, ..scheduled(at(2, 0)) });
    ctx.store.seed_history(BackupClass::Daily, ["old"]);
    ctx.store.set_fail_save(true);

    let outcome = ctx.runtime.run(BackupClass::Daily).await;

    assert!(matches!(outcome, RunOutcome::Failed(RuntimeError::Store(StoreError::SaveFailed(_)))));
    // Deletions already issued are not rolled back.
    assert_eq!(ctx.backups.deleted(), vec!["old"]);
    assert_eq!(ctx.store.saved_history(BackupClass::Daily), vec!["old"]);
    assert_eq!(ctx.notifier.messages(NotifyKind::Error).len(), 1);
}

#[tokio::test]
async fn failure_email_sent_when_enabled() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.store.set_notification_settings(NotificationSettings {
        email_on_failure: true,
        ..Default::default()
    });
    ctx.backups.set_fail_create(true);

    ctx.runtime.run(BackupClass::Daily).await;

    let mail = ctx.mailer.calls();
    assert_eq!(mail.len(), 1);
    assert_eq!(mail[0].subject, "Backup Scheduler: daily backup failed");
}

#[tokio::test]
async fn notification_transport_failure_does_not_fail_run() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.notifier.set_fail(true);

    let outcome = ctx.runtime.run(BackupClass::Daily).await;

    assert!(outcome.is_completed());
    assert_eq!(ctx.store.saves(), 1);
}

#[tokio::test]
async fn later_outcome_replaces_retained_failure() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.backups.set_fail_create(true);
    ctx.runtime.run(BackupClass::Daily).await;
    ctx.runtime.run(BackupClass::Daily).await;

    let live = ctx.notifier.live();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].kind, NotifyKind::Error);

    ctx.backups.set_fail_create(false);
    assert!(ctx.runtime.run(BackupClass::Daily).await.is_completed());

    let live = ctx.notifier.live();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].kind, NotifyKind::Info);
    assert!(live[0].message.contains("octoprint-daily-20260315-020000.zip"));
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferral gate tests: runs requested during a print replay when it ends.

use super::*;
use yare::parameterized;

fn print_ended(outcome: OperationOutcome) -> Event {
    Event::ProtectedOperationEnded { outcome }
}

#[tokio::test]
async fn blocked_run_is_deferred_without_side_effects() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 30)));
    ctx.store.seed_history(BackupClass::Daily, ["d1"]);
    ctx.runtime.reconfigure(ctx.runtime.read_policies());
    let armed_before = ctx.runtime.armed_triggers();
    let next_before = ctx.runtime.next_fire(BackupClass::Daily);
    ctx.activity.set_printing(true);

    let outcome = ctx.runtime.run(BackupClass::Daily).await;

    assert!(matches!(outcome, RunOutcome::Deferred));
    assert!(ctx.backups.calls().is_empty());
    assert_eq!(ctx.store.history(BackupClass::Daily), vec!["d1"]);
    assert_eq!(ctx.runtime.armed_triggers(), armed_before);
    assert_eq!(ctx.runtime.next_fire(BackupClass::Daily), next_before);
    assert!(ctx.notifier.calls().is_empty());

    let pending = ctx.runtime.pending();
    assert!(pending.is_deferred());
    assert!(pending.contains(BackupClass::Daily));
}

#[parameterized(
    done = { OperationOutcome::Done },
    failed = { OperationOutcome::Failed },
)]
#[test_macro(tokio::test)]
async fn print_end_replays_deferred_class(outcome: OperationOutcome) {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.activity.set_printing(true);
    ctx.runtime.run(BackupClass::Daily).await;
    ctx.runtime.run(BackupClass::Daily).await;

    ctx.activity.set_printing(false);
    let outcomes = ctx.runtime.handle_event(print_ended(outcome)).await;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].0, BackupClass::Daily);
    assert!(outcomes[0].1.is_completed());
    assert_eq!(ctx.backups.created().len(), 1);
    assert!(!ctx.runtime.pending().is_deferred());
}

#[tokio::test]
async fn replay_runs_eligible_once_and_drops_ineligible() {
    // Sunday the 15th: weekly (Sunday) is eligible, monthly (the 1st) is not.
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Weekly, Policy { weekday: 7, ..scheduled(at(2, 0)) });
    ctx.enable(BackupClass::Monthly, Policy { day_of_month: 1, ..scheduled(at(2, 0)) });
    ctx.activity.set_printing(true);
    ctx.runtime.run(BackupClass::Weekly).await;
    ctx.runtime.run(BackupClass::Monthly).await;
    assert_eq!(
        ctx.runtime.pending().classes().collect::<Vec<_>>(),
        vec![BackupClass::Weekly, BackupClass::Monthly]
    );

    ctx.activity.set_printing(false);
    let outcomes = ctx.runtime.handle_event(print_ended(OperationOutcome::Done)).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(ctx.backups.created(), vec!["octoprint-weekly-20260315-020000.zip"]);
    assert!(ctx.store.history(BackupClass::Monthly).is_empty());
    let pending = ctx.runtime.pending();
    assert!(!pending.is_deferred());
    assert_eq!(pending.classes().count(), 0);

    // A second print end has nothing left to replay.
    let again = ctx.runtime.handle_event(print_ended(OperationOutcome::Done)).await;
    assert!(again.is_empty());
    assert_eq!(ctx.backups.created().len(), 1);
}

#[tokio::test]
async fn print_end_without_deferral_runs_nothing() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));

    let outcomes = ctx.runtime.handle_event(print_ended(OperationOutcome::Done)).await;

    assert!(outcomes.is_empty());
    assert!(ctx.backups.calls().is_empty());
}

#[tokio::test]
async fn replay_during_new_print_defers_again() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.activity.set_printing(true);
    ctx.runtime.run(BackupClass::Daily).await;

    // Host reports the end of one print while the next has already started.
    let outcomes = ctx.runtime.handle_event(print_ended(OperationOutcome::Done)).await;

    assert!(matches!(outcomes[0].1, RunOutcome::Deferred));
    assert!(ctx.runtime.pending().contains(BackupClass::Daily));
    assert!(ctx.backups.calls().is_empty());
}

#[tokio::test]
async fn direct_run_after_print_consumes_deferral() {
    let ctx = setup_at(sunday_morning());
    ctx.enable(BackupClass::Daily, scheduled(at(2, 0)));
    ctx.activity.set_printing(true);
    ctx.runtime.run(BackupClass::Daily).await;
    ctx.activity.set_printing(false);

    assert!(ctx.runtime.run(BackupClass::Daily).await.is_completed());

    let outcomes = ctx.runtime.handle_event(print_ended(OperationOutcome::Done)).await;
    assert!(outcomes.is_empty());
    assert_eq!(ctx.backups.created().len(), 1);
}

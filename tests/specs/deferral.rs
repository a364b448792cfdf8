//! Deferral specs
//!
//! Verify that no backup starts during a print and that deferred backups run
//! once the print ends.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[tokio::test]
async fn backup_due_during_print_runs_when_print_finishes() {
    let host = Host::at(local(2026, 10, 12, 0, 0));
    host.configure(BackupClass::Daily, scheduled(at(2, 0)));
    host.send(Event::Startup).await;

    host.printer.set_printing(true);
    let due = host.pump_at(local(2026, 10, 12, 2, 0)).await;
    assert!(matches!(due[0].1, RunOutcome::Deferred));
    assert!(host.backups.calls().is_empty());

    host.clock.set_local(local(2026, 10, 12, 5, 30));
    host.printer.set_printing(false);
    let replayed = host.send(Event::ProtectedOperationEnded { outcome: OperationOutcome::Done }).await;

    assert_eq!(replayed.len(), 1);
    assert_eq!(host.backups.created(), vec!["octoprint-daily-20261012-053000.zip".to_string()]);
    assert!(!host.scheduler.pending().is_deferred());
}

#[tokio::test]
async fn failed_print_also_releases_deferred_backups() {
    let host = Host::at(local(2026, 10, 12, 0, 0));
    host.configure(BackupClass::Daily, scheduled(at(2, 0)));
    host.send(Event::Startup).await;

    host.printer.set_printing(true);
    host.pump_at(local(2026, 10, 12, 2, 0)).await;
    host.printer.set_printing(false);
    host.send(Event::ProtectedOperationEnded { outcome: OperationOutcome::Failed }).await;

    assert_eq!(host.backups.created().len(), 1);
}

#[tokio::test]
async fn deferred_weekly_dropped_if_print_ends_on_another_day() {
    // Wednesday weekly deferred past midnight into Thursday.
    let host = Host::at(local(2026, 10, 14, 0, 0));
    host.configure(BackupClass::Weekly, Policy { weekday: 3, ..scheduled(at(23, 0)) });
    host.send(Event::Startup).await;

    host.printer.set_printing(true);
    host.pump_at(local(2026, 10, 14, 23, 0)).await;

    host.clock.set_local(local(2026, 10, 15, 1, 0));
    host.printer.set_printing(false);
    let replayed = host.send(Event::ProtectedOperationEnded { outcome: OperationOutcome::Done }).await;

    assert!(matches!(replayed[0].1, RunOutcome::Skipped(_)));
    assert!(host.backups.calls().is_empty());
    assert!(!host.scheduler.pending().contains(BackupClass::Weekly));
}

//! Retention specs
//!
//! Verify that each class keeps only its newest backups.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[tokio::test]
async fn daily_history_is_capped_at_retention() {
    let host = Host::at(local(2026, 10, 12, 0, 0));
    host.configure(BackupClass::Daily, Policy { retention: 3, ..scheduled(at(1, 0)) });
    host.send(Event::Startup).await;

    for day in 12..=17 {
        host.pump_at(local(2026, 10, day, 1, 0)).await;
    }

    assert_eq!(
        host.settings.history(BackupClass::Daily),
        vec![
            "octoprint-daily-20261015-010000.zip".to_string(),
            "octoprint-daily-20261016-010000.zip".to_string(),
            "octoprint-daily-20261017-010000.zip".to_string(),
        ]
    );
    assert_eq!(host.backups.archives(), host.settings.history(BackupClass::Daily));
    assert_eq!(host.backups.deleted().len(), 3);
}

#[tokio::test]
async fn lowering_retention_trims_on_next_run() {
    let host = Host::at(local(2026, 10, 12, 0, 0));
    host.settings.seed_history(BackupClass::Daily, ["d1", "d2", "d3", "d4"]);
    host.backups.seed_archives(["d1", "d2", "d3", "d4"]);
    host.configure(BackupClass::Daily, Policy { retention: 1, ..scheduled(at(1, 0)) });
    host.send(Event::Startup).await;

    host.pump_at(local(2026, 10, 12, 1, 0)).await;

    assert_eq!(host.backups.deleted(), vec!["d1", "d2", "d3", "d4"]);
    assert_eq!(
        host.settings.history(BackupClass::Daily),
        vec!["octoprint-daily-20261012-010000.zip".to_string()]
    );
}

#[tokio::test]
async fn failed_backup_leaves_previous_backups_alone() {
    let host = Host::at(local(2026, 10, 12, 0, 0));
    host.settings.seed_history(BackupClass::Daily, ["d1"]);
    host.configure(BackupClass::Daily, Policy { retention: 1, ..scheduled(at(1, 0)) });
    host.send(Event::Startup).await;
    host.backups.set_fail_create(true);

    let outcome = host.pump_at(local(2026, 10, 12, 1, 0)).await;

    assert!(matches!(outcome[0].1, RunOutcome::Failed(_)));
    assert!(host.backups.deleted().is_empty());
    assert_eq!(host.settings.history(BackupClass::Daily), vec!["d1".to_string()]);
    let errors = host.notifications.messages(NotifyKind::Error);
    assert_eq!(errors.len(), 1);
    assert!(host.mail.calls().is_empty());
}

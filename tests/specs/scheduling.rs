//! Scheduling specs
//!
//! Verify that periodic backups fire at their configured time on their
//! configured day, once per day.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[tokio::test]
async fn daily_backup_fires_once_per_day_at_its_time() {
    let host = Host::at(local(2026, 10, 12, 0, 30));
    host.configure(BackupClass::Daily, scheduled(at(1, 15)));
    host.send(Event::Startup).await;

    assert!(host.pump_at(local(2026, 10, 12, 1, 14)).await.is_empty());
    let fired = host.pump_at(local(2026, 10, 12, 1, 15)).await;
    assert_eq!(fired.len(), 1);
    assert!(host.pump_at(local(2026, 10, 12, 1, 16)).await.is_empty());

    let next_day = host.pump_at(local(2026, 10, 13, 1, 15)).await;
    assert_eq!(next_day.len(), 1);
    assert_eq!(
        host.backups.created(),
        vec![
            "octoprint-daily-20261012-011500.zip".to_string(),
            "octoprint-daily-20261013-011500.zip".to_string(),
        ]
    );
}

#[tokio::test]
async fn weekly_backup_runs_only_on_its_weekday() {
    // Monday 2026-10-12; policy wants Wednesday.
    let host = Host::at(local(2026, 10, 12, 0, 0));
    host.configure(BackupClass::Weekly, Policy { weekday: 3, ..scheduled(at(4, 0)) });
    host.send(Event::Startup).await;

    for day in 12..=18 {
        host.pump_at(local(2026, 10, day, 4, 0)).await;
    }

    assert_eq!(host.backups.created(), vec!["octoprint-weekly-20261014-040000.zip".to_string()]);
}

#[tokio::test]
async fn monthly_backup_runs_on_its_day_and_skips_the_next() {
    let host = Host::at(local(2026, 3, 14, 12, 0));
    host.configure(BackupClass::Monthly, Policy { day_of_month: 15, ..scheduled(at(2, 0)) });
    host.send(Event::Startup).await;

    let on_day = host.pump_at(local(2026, 3, 15, 2, 0)).await;
    assert!(on_day[0].1.is_completed());
    let history = host.settings.history(BackupClass::Monthly);

    let next_day = host.pump_at(local(2026, 3, 16, 2, 0)).await;
    assert!(matches!(next_day[0].1, RunOutcome::Skipped(_)));
    assert_eq!(host.settings.history(BackupClass::Monthly), history);
}

#[tokio::test]
async fn saving_new_times_moves_the_schedule() {
    let host = Host::at(local(2026, 10, 12, 0, 0));
    host.configure(BackupClass::Daily, scheduled(at(1, 0)));
    host.send(Event::Startup).await;

    host.configure(BackupClass::Daily, scheduled(at(6, 0)));
    host.send(Event::ConfigurationChanged).await;

    assert!(host.pump_at(local(2026, 10, 12, 1, 0)).await.is_empty());
    assert_eq!(host.pump_at(local(2026, 10, 12, 6, 0)).await.len(), 1);
}

#[tokio::test]
async fn disabling_a_class_stops_its_trigger() {
    let host = Host::at(local(2026, 10, 12, 0, 0));
    host.configure(BackupClass::Daily, scheduled(at(1, 0)));
    host.send(Event::Startup).await;

    host.configure(BackupClass::Daily, Policy { enabled: false, ..scheduled(at(1, 0)) });
    host.send(Event::ConfigurationChanged).await;

    assert!(host.scheduler.armed_triggers().is_empty());
    assert!(host.pump_at(local(2026, 10, 12, 1, 0)).await.is_empty());
}

//! Settings specs
//!
//! Verify how persisted policy settings are interpreted.

use crate::prelude::*;
use crate::prelude::assert_eq;
use bsched_core::{NotificationSettings, TimeOfDay};

#[test]
fn missing_fields_take_shipped_defaults() {
    let policy: Policy = serde_json::from_str("{}").unwrap();
    assert_eq!(policy, Policy::default());
    assert!(!policy.enabled);
    assert_eq!(policy.time_of_day, Some(TimeOfDay::MIDNIGHT));
    assert_eq!(policy.retention, 1);
    assert_eq!(policy.weekday, 7);
    assert_eq!(policy.day_of_month, 1);
}

#[test]
fn invalid_time_is_normalised_to_midnight() {
    let policy: Policy = serde_json::from_str(r#"{"enabled": true, "time": "25:99"}"#).unwrap();
    assert_eq!(policy.time_of_day, Some(TimeOfDay::MIDNIGHT));
}

#[test]
fn empty_time_never_fires() {
    let policy: Policy = serde_json::from_str(r#"{"enabled": true, "time": ""}"#).unwrap();
    assert_eq!(policy.time_of_day, None);
    assert!(!policy.is_scheduled());
}

#[tokio::test]
async fn policy_loaded_from_json_drives_the_schedule() {
    let host = Host::at(local(2026, 10, 12, 0, 0));
    let daily: Policy = serde_json::from_str(
        r#"{"enabled": true, "time": "3:05", "retention": 2, "exclude_uploads": true}"#,
    )
    .unwrap();
    host.configure(BackupClass::Daily, daily);
    host.send(Event::Startup).await;

    assert_eq!(host.scheduler.next_fire(BackupClass::Daily), Some(local(2026, 10, 12, 3, 5)));
}

#[test]
fn notification_settings_default_to_notify_only() {
    let settings: NotificationSettings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, NotificationSettings::default());
    assert!(settings.notify_on_success);
    assert!(!settings.email_on_failure);
    assert!(!settings.email_on_success);
}

#[tokio::test]
async fn success_email_only_when_requested() {
    let host = Host::at(local(2026, 10, 12, 0, 0));
    host.configure(BackupClass::Daily, scheduled(at(1, 0)));
    host.settings.set_notification_settings(NotificationSettings {
        notify_on_success: false,
        email_on_success: true,
        ..Default::default()
    });
    host.send(Event::Startup).await;

    host.pump_at(local(2026, 10, 12, 1, 0)).await;

    assert!(host.notifications.calls().is_empty());
    assert_eq!(host.mail.calls().len(), 1);
}

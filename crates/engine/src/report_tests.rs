// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bsched_adapters::{BackupError, FakeMailAdapter, FakeNotifyAdapter, NotifyCall, NotifySlot};

fn reporter() -> (Reporter<FakeNotifyAdapter, FakeMailAdapter>, FakeNotifyAdapter, FakeMailAdapter) {
    let notify = FakeNotifyAdapter::new();
    let mail = FakeMailAdapter::new();
    (Reporter::new(notify.clone(), mail.clone()), notify, mail)
}

fn report<'a>(filename: &'a str, deleted: &'a [String]) -> SuccessReport<'a> {
    SuccessReport { class: BackupClass::Daily, filename, deleted }
}

#[tokio::test]
async fn success_sends_transient_info_by_default() {
    let (reporter, notify, mail) = reporter();
    reporter.success(NotificationSettings::default(), report("a.zip", &[])).await;

    assert_eq!(
        notify.calls(),
        vec![NotifyCall {
            kind: NotifyKind::Info,
            message: "Daily backup a.zip created.".into(),
            retain: false,
            slot: Some(NotifySlot::Outcome),
        }]
    );
    assert!(mail.calls().is_empty());
}

#[tokio::test]
async fn success_is_silent_when_disabled() {
    let (reporter, notify, mail) = reporter();
    let settings = NotificationSettings { notify_on_success: false, ..Default::default() };
    reporter.success(settings, report("a.zip", &[])).await;
    assert!(notify.calls().is_empty());
    assert!(mail.calls().is_empty());
}

#[tokio::test]
async fn success_email_lists_pruned_artifacts() {
    let (reporter, _notify, mail) = reporter();
    let settings = NotificationSettings {
        notify_on_success: false,
        email_on_success: true,
        ..Default::default()
    };
    let deleted = vec!["old<1>.zip".to_string()];
    reporter.success(settings, report("new.zip", &deleted)).await;

    let calls = mail.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].subject, "Backup Scheduler: daily backup created");
    assert!(calls[0].html_body.contains("<b>new.zip</b>"));
    assert!(calls[0].html_body.contains("<li>old&lt;1&gt;.zip</li>"));
}

#[tokio::test]
async fn failure_is_retained_error() {
    let (reporter, notify, mail) = reporter();
    reporter
        .failure(NotificationSettings::default(), BackupClass::Weekly, &RuntimeError::DestinationMissing)
        .await;

    assert_eq!(
        notify.calls(),
        vec![NotifyCall {
            kind: NotifyKind::Error,
            message: "Backup failed as the mount was missing!".into(),
            retain: true,
            slot: Some(NotifySlot::Outcome),
        }]
    );
    assert!(mail.calls().is_empty());
}

#[tokio::test]
async fn failure_email_when_enabled() {
    let (reporter, _notify, mail) = reporter();
    let settings = NotificationSettings { email_on_failure: true, ..Default::default() };
    let error = RuntimeError::Backup(BackupError::CreateFailed("disk full".into()));
    reporter.failure(settings, BackupClass::Monthly, &error).await;

    let calls = mail.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].subject, "Backup Scheduler: monthly backup failed");
    assert!(calls[0].html_body.contains("<p>Backup failed: disk full</p>"));
}

#[tokio::test]
async fn email_failure_becomes_secondary_notification() {
    let (reporter, notify, mail) = reporter();
    mail.set_fail(true);
    let settings = NotificationSettings { email_on_failure: true, ..Default::default() };
    reporter.failure(settings, BackupClass::Daily, &RuntimeError::DestinationMissing).await;

    let errors = notify.messages(NotifyKind::Error);
    assert_eq!(errors.len(), 2);
    assert_eq!(notify.calls()[1].slot, None);
    assert_eq!(
        errors[1],
        "Backup Scheduler could not send email: mail delivery failed: connection refused"
    );
}

#[tokio::test]
async fn notification_failure_is_contained() {
    let (reporter, notify, _mail) = reporter();
    notify.set_fail(true);
    reporter.success(NotificationSettings::default(), report("a.zip", &[])).await;

    // Original attempt plus one secondary attempt, both failing quietly.
    assert_eq!(notify.calls().len(), 2);
    assert_eq!(notify.calls()[1].kind, NotifyKind::Error);
}

#[tokio::test]
async fn latest_outcome_replaces_earlier_ones() {
    let (reporter, notify, _mail) = reporter();
    let settings = NotificationSettings::default();
    let error = RuntimeError::Backup(BackupError::CreateFailed("disk full".into()));
    reporter.failure(settings, BackupClass::Daily, &error).await;
    reporter.failure(settings, BackupClass::Daily, &RuntimeError::DestinationMissing).await;

    let live = notify.live();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].message, "Backup failed as the mount was missing!");

    reporter.success(settings, report("a.zip", &[])).await;

    let live = notify.live();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].kind, NotifyKind::Info);
    assert_eq!(live[0].message, "Daily backup a.zip created.");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    info = { NotifyKind::Info, "info" },
    error = { NotifyKind::Error, "error" },
)]
fn kind_display(kind: NotifyKind, expected: &str) {
    assert_eq!(kind.to_string(), expected);
}

#[tokio::test]
async fn fake_records_notifications_in_order() {
    let notify = FakeNotifyAdapter::new();
    notify.notify(NotifyKind::Info, "first", false, None).await.unwrap();
    notify.notify(NotifyKind::Error, "second", true, None).await.unwrap();

    let calls = notify.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        NotifyCall { kind: NotifyKind::Info, message: "first".into(), retain: false, slot: None }
    );
    assert_eq!(
        calls[1],
        NotifyCall { kind: NotifyKind::Error, message: "second".into(), retain: true, slot: None }
    );
    assert_eq!(notify.messages(NotifyKind::Error), vec!["second"]);
}

#[tokio::test]
async fn fake_failure_still_records_call() {
    let notify = FakeNotifyAdapter::new();
    notify.set_fail(true);
    let err = notify.notify(NotifyKind::Info, "hello", false, None).await.unwrap_err();
    assert_eq!(err.to_string(), "send failed: notification bus closed");
    assert_eq!(notify.calls().len(), 1);
    assert!(notify.live().is_empty());
}

#[tokio::test]
async fn slotted_send_replaces_previous_occupant() {
    let notify = FakeNotifyAdapter::new();
    let slot = Some(NotifySlot::Outcome);
    notify.notify(NotifyKind::Error, "first failure", true, slot).await.unwrap();
    notify.notify(NotifyKind::Error, "second failure", true, slot).await.unwrap();
    notify.notify(NotifyKind::Error, "unrelated", true, None).await.unwrap();

    let live: Vec<_> = notify.live().into_iter().map(|c| c.message).collect();
    assert_eq!(live, vec!["second failure", "unrelated"]);

    notify.notify(NotifyKind::Info, "recovered", false, slot).await.unwrap();
    let live: Vec<_> = notify.live().into_iter().map(|c| c.message).collect();
    assert_eq!(live, vec!["unrelated", "recovered"]);
}

#[tokio::test]
async fn unslotted_transient_notification_is_not_live() {
    let notify = FakeNotifyAdapter::new();
    notify.notify(NotifyKind::Info, "fleeting", false, None).await.unwrap();
    assert!(notify.live().is_empty());
}

#[test]
fn slot_display() {
    assert_eq!(NotifySlot::Outcome.to_string(), "outcome");
}

#[cfg(all(unix, not(target_os = "macos")))]
#[tokio::test]
#[serial_test::serial]
async fn desktop_adapter_reports_unreachable_bus() {
    let saved = std::env::var_os("DBUS_SESSION_BUS_ADDRESS");
    std::env::set_var("DBUS_SESSION_BUS_ADDRESS", "unix:path=/nonexistent/bsched-test-bus");

    let adapter = DesktopNotifyAdapter::new();
    let result = adapter.notify(NotifyKind::Error, "test", true, Some(NotifySlot::Outcome)).await;

    match saved {
        Some(value) => std::env::set_var("DBUS_SESSION_BUS_ADDRESS", value),
        None => std::env::remove_var("DBUS_SESSION_BUS_ADDRESS"),
    }
    assert!(matches!(result, Err(NotifyError::SendFailed(_))));
    assert!(adapter.shown.lock().is_empty());
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Info,
    Error,
}

bsched_core::simple_display! {
    NotifyKind {
        Info => "info",
        Error => "error",
    }
}

/// A fixed position for a notification. A send into an occupied slot
/// replaces what is shown there instead of adding another message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifySlot {
    /// The result of the most recent backup run.
    Outcome,
}

bsched_core::simple_display! {
    NotifySlot {
        Outcome => "outcome",
    }
}

/// Adapter for sending user-facing notifications
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Show `message`. A retained notification stays until dismissed or
    /// replaced. With a `slot`, the message replaces the slot's previous one.
    async fn notify(
        &self,
        kind: NotifyKind,
        message: &str,
        retain: bool,
        slot: Option<NotifySlot>,
    ) -> Result<(), NotifyError>;
}

const SUMMARY: &str = "Backup Scheduler";

/// Desktop notification adapter using notify-rust.
///
/// On macOS, `notify-rust` uses `mac-notification-sys` to reach the
/// Notification Center. Its first send runs an AppleScript bundle lookup that
/// blocks forever in processes without Automation permissions, so the bundle
/// identifier is pre-set at construction.
///
/// Slot replacement relies on notification ids, which only the freedesktop
/// backend exposes. Elsewhere slotted sends show a new notification.
#[derive(Clone, Debug, Default)]
pub struct DesktopNotifyAdapter {
    /// Server-assigned id of the notification currently in each slot.
    shown: Arc<Mutex<HashMap<NotifySlot, u32>>>,
}

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self::default()
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(
        &self,
        kind: NotifyKind,
        message: &str,
        retain: bool,
        slot: Option<NotifySlot>,
    ) -> Result<(), NotifyError> {
        let message = message.to_string();
        let replaces = slot.and_then(|slot| self.shown.lock().get(&slot).copied());
        // Notification::show() is synchronous on macOS; keep it off the async runtime.
        let sent = tokio::task::spawn_blocking(move || {
            tracing::info!(%kind, %message, retain, "sending desktop notification");
            let mut notification = notify_rust::Notification::new();
            notification.summary(SUMMARY).body(&message);
            if retain {
                notification.timeout(notify_rust::Timeout::Never);
            }
            show(&mut notification, replaces)
        })
        .await
        .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        match sent {
            Ok(id) => {
                tracing::debug!(%kind, "desktop notification sent");
                if let (Some(slot), Some(id)) = (slot, id) {
                    self.shown.lock().insert(slot, id);
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%kind, error = %e, "desktop notification failed");
                Err(NotifyError::SendFailed(e.to_string()))
            }
        }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn show(
    notification: &mut notify_rust::Notification,
    replaces: Option<u32>,
) -> Result<Option<u32>, notify_rust::error::Error> {
    if let Some(id) = replaces {
        notification.id(id);
    }
    notification.show().map(|handle| Some(handle.id()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn show(
    notification: &mut notify_rust::Notification,
    _replaces: Option<u32>,
) -> Result<Option<u32>, notify_rust::error::Error> {
    notification.show().map(|_| None)
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{NotifyAdapter, NotifyError, NotifyKind, NotifySlot};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded notification
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct NotifyCall {
        pub kind: NotifyKind,
        pub message: String,
        pub retain: bool,
        pub slot: Option<NotifySlot>,
    }

    #[derive(Default)]
    struct FakeNotifyState {
        calls: Vec<NotifyCall>,
        live: Vec<NotifyCall>,
        fail: bool,
    }

    /// Fake notification adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeNotifyAdapter {
        inner: Arc<Mutex<FakeNotifyState>>,
    }

    impl FakeNotifyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent send fail (calls are still recorded)
        pub fn set_fail(&self, fail: bool) {
            self.inner.lock().fail = fail;
        }

        /// Get all recorded notifications
        pub fn calls(&self) -> Vec<NotifyCall> {
            self.inner.lock().calls.clone()
        }

        /// Notifications still on screen: retained ones, with slotted sends
        /// replacing their slot's previous occupant. Transient ones are
        /// included only while they occupy a slot.
        pub fn live(&self) -> Vec<NotifyCall> {
            self.inner.lock().live.clone()
        }

        /// Messages of recorded notifications of `kind`
        pub fn messages(&self, kind: NotifyKind) -> Vec<String> {
            self.inner
                .lock()
                .calls
                .iter()
                .filter(|c| c.kind == kind)
                .map(|c| c.message.clone())
                .collect()
        }
    }

    #[async_trait]
    impl NotifyAdapter for FakeNotifyAdapter {
        async fn notify(
            &self,
            kind: NotifyKind,
            message: &str,
            retain: bool,
            slot: Option<NotifySlot>,
        ) -> Result<(), NotifyError> {
            let mut inner = self.inner.lock();
            let call = NotifyCall { kind, message: message.to_string(), retain, slot };
            inner.calls.push(call.clone());
            if inner.fail {
                return Err(NotifyError::SendFailed("notification bus closed".to_string()));
            }
            if slot.is_some() {
                inner.live.retain(|c| c.slot != slot);
            }
            if retain || slot.is_some() {
                inner.live.push(call);
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;

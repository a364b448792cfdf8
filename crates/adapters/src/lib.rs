// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bsched-adapters: Collaborator interfaces used by the backup scheduler
//!
//! The scheduler never archives files, talks SMTP, or persists settings
//! itself. Each of those concerns sits behind one of these traits and is
//! supplied by the host application.

pub mod activity;
pub mod backup;
pub mod mail;
pub mod notify;
pub mod store;

pub use activity::ActivityAdapter;
pub use backup::{BackupAdapter, BackupError};
pub use mail::{MailAdapter, MailError};
pub use notify::{DesktopNotifyAdapter, NotifyAdapter, NotifyError, NotifyKind, NotifySlot};
pub use store::{PolicyStore, StoreError};

#[cfg(any(test, feature = "test-support"))]
pub use activity::FakeActivityAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use backup::{BackupCall, FakeBackupAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use mail::{FakeMailAdapter, MailCall};
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use store::FakePolicyStore;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{Runtime, RuntimeConfig, RuntimeDeps};
use bsched_adapters::{
    FakeActivityAdapter, FakeBackupAdapter, FakeMailAdapter, FakeNotifyAdapter, FakePolicyStore,
};
use bsched_core::{BackupClass, FakeClock, Policy};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Convenience alias for the fully-typed test runtime.
pub(crate) type TestRuntime = Runtime<
    FakeBackupAdapter,
    FakeActivityAdapter,
    FakePolicyStore,
    FakeNotifyAdapter,
    FakeMailAdapter,
    FakeClock,
>;

/// Test context holding the runtime and handles to every fake it uses.
pub(crate) struct TestContext {
    pub runtime: Arc<TestRuntime>,
    pub clock: FakeClock,
    pub backups: FakeBackupAdapter,
    pub activity: FakeActivityAdapter,
    pub store: FakePolicyStore,
    pub notifier: FakeNotifyAdapter,
    pub mailer: FakeMailAdapter,
}

/// Create a test runtime whose wall clock reads `now`.
pub(crate) fn setup_at(now: NaiveDateTime) -> TestContext {
    setup_with_config(now, RuntimeConfig::default())
}

pub(crate) fn setup_with_config(now: NaiveDateTime, config: RuntimeConfig) -> TestContext {
    let clock = FakeClock::at(now);
    let backups = FakeBackupAdapter::new();
    let activity = FakeActivityAdapter::new();
    let store = FakePolicyStore::new();
    let notifier = FakeNotifyAdapter::new();
    let mailer = FakeMailAdapter::new();
    let runtime = Runtime::new(
        RuntimeDeps {
            backups: backups.clone(),
            activity: activity.clone(),
            store: store.clone(),
            notifier: notifier.clone(),
            mailer: mailer.clone(),
        },
        clock.clone(),
        config,
    );
    TestContext { runtime: Arc::new(runtime), clock, backups, activity, store, notifier, mailer }
}

impl TestContext {
    /// Store an enabled policy for `class`.
    pub(crate) fn enable(&self, class: BackupClass, policy: Policy) {
        self.store.set_policy(class, Policy { enabled: true, ..policy });
    }

    /// Let spawned tasks run until they block again.
    pub(crate) async fn settle(&self) {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }
}

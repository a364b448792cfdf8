// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host settings store: per-class policies, artifact history, report settings.

use bsched_core::{BackupClass, NotificationSettings, Policy};
use thiserror::Error;

/// Errors from persisting settings
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings save failed: {0}")]
    SaveFailed(String),
}

/// Read/write access to the scheduler's persisted settings.
///
/// Reads are cheap and infallible; hosts fall back to shipped defaults
/// (see [`Policy::defaults_for`]) for anything never configured.
/// `set_history` stages a change that only becomes durable on `save`.
pub trait PolicyStore: Clone + Send + Sync + 'static {
    fn policy(&self, class: BackupClass) -> Policy;

    /// Artifact identifiers for `class`, oldest first.
    fn history(&self, class: BackupClass) -> Vec<String>;

    fn set_history(&self, class: BackupClass, history: Vec<String>);

    fn save(&self) -> Result<(), StoreError>;

    /// Name used as the filename prefix. `None` when the host has none.
    fn instance_name(&self) -> Option<String>;

    fn notification_settings(&self) -> NotificationSettings;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{PolicyStore, StoreError};
    use bsched_core::{BackupClass, NotificationSettings, Policy};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeStoreState {
        policies: HashMap<BackupClass, Policy>,
        histories: HashMap<BackupClass, Vec<String>>,
        saved_histories: HashMap<BackupClass, Vec<String>>,
        instance_name: Option<String>,
        notifications: NotificationSettings,
        fail_save: bool,
        saves: usize,
    }

    /// In-memory settings store for testing
    #[derive(Clone, Default)]
    pub struct FakePolicyStore {
        inner: Arc<Mutex<FakeStoreState>>,
    }

    impl FakePolicyStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_policy(&self, class: BackupClass, policy: Policy) {
            self.inner.lock().policies.insert(class, policy);
        }

        /// Seed a history as if it had been saved earlier
        pub fn seed_history<I, S>(&self, class: BackupClass, names: I)
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            let names: Vec<String> = names.into_iter().map(Into::into).collect();
            let mut inner = self.inner.lock();
            inner.histories.insert(class, names.clone());
            inner.saved_histories.insert(class, names);
        }

        pub fn set_instance_name(&self, name: Option<&str>) {
            self.inner.lock().instance_name = name.map(str::to_string);
        }

        pub fn set_notification_settings(&self, settings: NotificationSettings) {
            self.inner.lock().notifications = settings;
        }

        pub fn set_fail_save(&self, fail: bool) {
            self.inner.lock().fail_save = fail;
        }

        /// Number of successful saves
        pub fn saves(&self) -> usize {
            self.inner.lock().saves
        }

        /// History as of the last successful save
        pub fn saved_history(&self, class: BackupClass) -> Vec<String> {
            self.inner.lock().saved_histories.get(&class).cloned().unwrap_or_default()
        }
    }

    impl PolicyStore for FakePolicyStore {
        fn policy(&self, class: BackupClass) -> Policy {
            self.inner
                .lock()
                .policies
                .get(&class)
                .cloned()
                .unwrap_or_else(|| Policy::defaults_for(class))
        }

        fn history(&self, class: BackupClass) -> Vec<String> {
            self.inner.lock().histories.get(&class).cloned().unwrap_or_default()
        }

        fn set_history(&self, class: BackupClass, history: Vec<String>) {
            self.inner.lock().histories.insert(class, history);
        }

        fn save(&self) -> Result<(), StoreError> {
            let mut inner = self.inner.lock();
            if inner.fail_save {
                return Err(StoreError::SaveFailed("read-only filesystem".to_string()));
            }
            inner.saved_histories = inner.histories.clone();
            inner.saves += 1;
            Ok(())
        }

        fn instance_name(&self) -> Option<String> {
            self.inner.lock().instance_name.clone()
        }

        fn notification_settings(&self) -> NotificationSettings {
            self.inner.lock().notifications
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePolicyStore;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

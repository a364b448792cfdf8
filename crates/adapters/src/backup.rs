// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backup engine adapter: creates and deletes backup archives.

use async_trait::async_trait;
use bsched_core::Exclusion;
use thiserror::Error;

/// Errors from the backup engine
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("backup creation failed: {0}")]
    CreateFailed(String),
    #[error("backup deletion failed for {name}: {reason}")]
    DeleteFailed { name: String, reason: String },
    #[error("backup destination unavailable: {0}")]
    DestinationUnavailable(String),
}

/// Adapter for the host's backup engine
#[async_trait]
pub trait BackupAdapter: Clone + Send + Sync + 'static {
    /// Create an archive named `filename`, leaving out `exclude`.
    async fn create_backup(&self, exclude: &[Exclusion], filename: &str)
        -> Result<(), BackupError>;

    /// Delete a previously created archive.
    async fn delete_backup(&self, name: &str) -> Result<(), BackupError>;

    /// Whether the backup destination (e.g. a mounted share) is reachable.
    async fn destination_available(&self) -> bool {
        true
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{BackupAdapter, BackupError};
    use async_trait::async_trait;
    use bsched_core::Exclusion;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Recorded backup engine call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum BackupCall {
        Create { exclude: Vec<Exclusion>, filename: String },
        Delete { name: String },
    }

    #[derive(Default)]
    struct FakeBackupState {
        calls: Vec<BackupCall>,
        archives: Vec<String>,
        fail_create: bool,
        fail_delete: HashSet<String>,
        destination_missing: bool,
        create_gate: Option<Arc<Notify>>,
    }

    /// Fake backup engine for testing
    #[derive(Clone, Default)]
    pub struct FakeBackupAdapter {
        inner: Arc<Mutex<FakeBackupState>>,
    }

    impl FakeBackupAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent `create_backup` fail
        pub fn set_fail_create(&self, fail: bool) {
            self.inner.lock().fail_create = fail;
        }

        /// Make deletion of `name` fail
        pub fn fail_delete_of(&self, name: impl Into<String>) {
            self.inner.lock().fail_delete.insert(name.into());
        }

        /// Simulate a missing mount
        pub fn set_destination_missing(&self, missing: bool) {
            self.inner.lock().destination_missing = missing;
        }

        /// Hold every subsequent `create_backup` until the returned gate is
        /// notified. Each notification releases one call.
        pub fn pause_create(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            self.inner.lock().create_gate = Some(Arc::clone(&gate));
            gate
        }

        /// Seed archives that exist before the test starts
        pub fn seed_archives<I, S>(&self, names: I)
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.inner.lock().archives.extend(names.into_iter().map(Into::into));
        }

        /// Get all recorded calls
        pub fn calls(&self) -> Vec<BackupCall> {
            self.inner.lock().calls.clone()
        }

        /// Filenames passed to successful `create_backup` calls
        pub fn created(&self) -> Vec<String> {
            self.inner
                .lock()
                .calls
                .iter()
                .filter_map(|c| match c {
                    BackupCall::Create { filename, .. } => Some(filename.clone()),
                    BackupCall::Delete { .. } => None,
                })
                .collect()
        }

        /// Names passed to `delete_backup`, including failed attempts
        pub fn deleted(&self) -> Vec<String> {
            self.inner
                .lock()
                .calls
                .iter()
                .filter_map(|c| match c {
                    BackupCall::Delete { name } => Some(name.clone()),
                    BackupCall::Create { .. } => None,
                })
                .collect()
        }

        /// Archives currently present
        pub fn archives(&self) -> Vec<String> {
            self.inner.lock().archives.clone()
        }
    }

    #[async_trait]
    impl BackupAdapter for FakeBackupAdapter {
        async fn create_backup(
            &self,
            exclude: &[Exclusion],
            filename: &str,
        ) -> Result<(), BackupError> {
            let gate = self.inner.lock().create_gate.clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            let mut inner = self.inner.lock();
            if inner.fail_create {
                return Err(BackupError::CreateFailed(format!("{filename}: disk full")));
            }
            inner.calls.push(BackupCall::Create {
                exclude: exclude.to_vec(),
                filename: filename.to_string(),
            });
            inner.archives.push(filename.to_string());
            Ok(())
        }

        async fn delete_backup(&self, name: &str) -> Result<(), BackupError> {
            let mut inner = self.inner.lock();
            inner.calls.push(BackupCall::Delete { name: name.to_string() });
            if inner.fail_delete.contains(name) {
                return Err(BackupError::DeleteFailed {
                    name: name.to_string(),
                    reason: "permission denied".to_string(),
                });
            }
            inner.archives.retain(|a| a != name);
            Ok(())
        }

        async fn destination_available(&self) -> bool {
            !self.inner.lock().destination_missing
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{BackupCall, FakeBackupAdapter};

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;

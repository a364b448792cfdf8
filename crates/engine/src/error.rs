// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime error types

use bsched_adapters::{BackupError, StoreError};
use thiserror::Error;

/// Why a backup run failed.
///
/// Never escapes [`Runtime::run`](crate::Runtime::run); it is carried inside
/// [`RunOutcome::Failed`](crate::RunOutcome::Failed) and reported to the user.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("backup destination is missing")]
    DestinationMissing,
    #[error(transparent)]
    Backup(#[from] BackupError),
    #[error("backup created but history could not be saved: {0}")]
    Store(#[from] StoreError),
}

impl RuntimeError {
    /// Message shown to the user in the failure notification.
    pub fn user_message(&self) -> String {
        match self {
            RuntimeError::DestinationMissing => "Backup failed as the mount was missing!".to_string(),
            RuntimeError::Backup(BackupError::CreateFailed(reason)) => {
                format!("Backup failed: {reason}")
            }
            RuntimeError::Backup(BackupError::DestinationUnavailable(_)) => {
                "Backup failed as the mount was missing!".to_string()
            }
            RuntimeError::Backup(BackupError::DeleteFailed { name, reason }) => {
                format!("Backup failed: could not delete {name}: {reason}")
            }
            RuntimeError::Store(StoreError::SaveFailed(reason)) => {
                format!("Backup created but its history was not saved: {reason}")
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

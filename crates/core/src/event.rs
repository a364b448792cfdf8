// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host lifecycle signals consumed by the scheduler.

use crate::class::BackupClass;
use serde::{Deserialize, Serialize};

/// How the protected operation (a print job) finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationOutcome {
    Done,
    Failed,
}

crate::simple_display! {
    OperationOutcome {
        Done => "done",
        Failed => "failed",
    }
}

/// Events delivered by the host application.
///
/// Serializes with `{"type": "event:name", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The host finished starting up.
    #[serde(rename = "host:startup")]
    Startup,

    /// Some host settings were saved. May or may not touch backup policies.
    #[serde(rename = "config:changed")]
    ConfigurationChanged,

    /// The protected operation ended; deferred backups may now run.
    #[serde(rename = "operation:ended")]
    ProtectedOperationEnded { outcome: OperationOutcome },

    /// Run one class immediately (manual trigger), subject to the usual gating.
    #[serde(rename = "backup:requested")]
    RunRequested { class: BackupClass },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Startup => "host:startup",
            Event::ConfigurationChanged => "config:changed",
            Event::ProtectedOperationEnded { .. } => "operation:ended",
            Event::RunRequested { .. } => "backup:requested",
        }
    }

    /// One-line description for logs.
    pub fn log_summary(&self) -> String {
        let t = self.name();
        match self {
            Event::Startup | Event::ConfigurationChanged => t.to_string(),
            Event::ProtectedOperationEnded { outcome } => format!("{t} outcome={outcome}"),
            Event::RunRequested { class } => format!("{t} class={class}"),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backup artifact naming.
//!
//! The generated name is both the argument to the backup engine and the
//! identifier recorded in a class's history:
//! `{instance}-{class}-{YYYYMMDD-HHMMSS}.zip`.

use crate::class::BackupClass;
use chrono::NaiveDateTime;

/// Instance name used when the host has none configured.
pub const DEFAULT_INSTANCE_NAME: &str = "octoprint";

/// Build the artifact name for a backup of `class` taken at `at`.
///
/// A blank `instance` falls back to `fallback`.
pub fn backup_filename(
    instance: Option<&str>,
    fallback: &str,
    class: BackupClass,
    at: NaiveDateTime,
) -> String {
    let instance = instance.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(fallback);
    format!("{}-{}-{}.zip", instance, class, at.format("%Y%m%d-%H%M%S"))
}

#[cfg(test)]
#[path = "filename_tests.rs"]
mod tests;

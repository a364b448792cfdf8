// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backup classes: the independent schedule kinds.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// One of the four independent schedule kinds.
///
/// Each class carries its own policy and history. There is no ordering
/// relationship between classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupClass {
    Daily,
    Weekly,
    Monthly,
    Startup,
}

crate::simple_display! {
    BackupClass {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Startup => "startup",
    }
}

impl BackupClass {
    /// Lowercase name used in filenames, trigger ids, and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupClass::Daily => "daily",
            BackupClass::Weekly => "weekly",
            BackupClass::Monthly => "monthly",
            BackupClass::Startup => "startup",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown backup class: {0}")]
pub struct ParseClassError(pub String);

impl FromStr for BackupClass {
    type Err = ParseClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Legacy settings keys carry a `_backups` suffix ("daily_backups").
        let name = s.trim();
        let name = name.strip_suffix("_backups").unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "daily" => Ok(BackupClass::Daily),
            "weekly" => Ok(BackupClass::Weekly),
            "monthly" => Ok(BackupClass::Monthly),
            "startup" => Ok(BackupClass::Startup),
            _ => Err(ParseClassError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "class_tests.rs"]
mod tests;

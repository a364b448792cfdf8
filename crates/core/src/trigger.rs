// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger identifier type for tracking armed schedule triggers.
//!
//! Every trigger armed by the backup scheduler carries the `backup:` tag so
//! the whole set can be cancelled before a new configuration is armed.

use crate::class::BackupClass;

crate::define_id! {
    /// Unique identifier for an armed trigger.
    ///
    /// Format: `{tag}:{class}`, e.g. `backup:daily`.
    pub struct TriggerId;
}

/// Tag shared by every trigger this subsystem arms.
pub const BACKUP_TAG: &str = "backup";

impl TriggerId {
    pub fn backup(class: BackupClass) -> Self {
        TriggerKind::Backup(class).to_trigger_id()
    }

    /// Parse this trigger ID into a typed `TriggerKind`.
    pub fn kind(&self) -> Option<TriggerKind> {
        TriggerKind::parse(self.as_str())
    }

    /// The tag portion of the id (text before the first `:`).
    pub fn tag(&self) -> &str {
        self.as_str().split_once(':').map_or(self.as_str(), |(tag, _)| tag)
    }

    /// Returns true if this trigger belongs to the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag() == tag
    }
}

/// Parsed representation of a trigger ID for type-safe routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Backup(BackupClass),
}

impl TriggerKind {
    /// Parse a trigger ID string into a typed `TriggerKind`.
    ///
    /// Returns `None` for unrecognized trigger ID formats.
    pub fn parse(id: &str) -> Option<TriggerKind> {
        let (tag, rest) = id.split_once(':')?;
        match tag {
            BACKUP_TAG => rest.parse().ok().map(TriggerKind::Backup),
            _ => None,
        }
    }

    /// Format this `TriggerKind` back into a canonical `TriggerId`.
    pub fn to_trigger_id(self) -> TriggerId {
        match self {
            TriggerKind::Backup(class) => TriggerId::new(format!("{BACKUP_TAG}:{class}")),
        }
    }

    /// The backup class carried by this trigger.
    pub fn class(self) -> BackupClass {
        match self {
            TriggerKind::Backup(class) => class,
        }
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferral bookkeeping for runs requested while a print is active.

use bsched_core::BackupClass;
use std::collections::BTreeSet;

/// Classes whose runs were requested while the gate was closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingState {
    deferred: bool,
    classes: BTreeSet<BackupClass>,
}

impl PendingState {
    /// Record a blocked run of `class`. Repeats collapse into one entry.
    pub fn defer(&mut self, class: BackupClass) {
        self.deferred = true;
        self.classes.insert(class);
    }

    /// Drop `class` from the deferred set once it has been evaluated.
    ///
    /// Clears the pending flag when nothing is left. Returns whether the
    /// class was deferred.
    pub fn consume(&mut self, class: BackupClass) -> bool {
        let removed = self.classes.remove(&class);
        if self.classes.is_empty() {
            self.deferred = false;
        }
        removed
    }

    /// Classes to replay when the gate reopens; empty unless a run was deferred.
    pub fn replay(&self) -> Vec<BackupClass> {
        if !self.deferred {
            return Vec::new();
        }
        self.classes.iter().copied().collect()
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    pub fn contains(&self, class: BackupClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn classes(&self) -> impl Iterator<Item = BackupClass> + '_ {
        self.classes.iter().copied()
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retention pruning: which artifacts to delete, which to keep.

/// Split of a history into artifacts to delete and artifacts to keep.
///
/// `to_delete ++ surviving` is always the input sequence, both oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pruned {
    pub to_delete: Vec<String>,
    pub surviving: Vec<String>,
}

/// Append `new_id` to `history` and keep the newest `retention` entries.
///
/// A retention of zero keeps nothing, including the new artifact.
pub fn prune(history: &[String], new_id: &str, retention: u32) -> Pruned {
    let mut extended = Vec::with_capacity(history.len() + 1);
    extended.extend_from_slice(history);
    extended.push(new_id.to_string());
    split(extended, retention)
}

/// Apply `retention` to `history` without adding anything.
pub fn prune_existing(history: &[String], retention: u32) -> Pruned {
    split(history.to_vec(), retention)
}

fn split(mut extended: Vec<String>, retention: u32) -> Pruned {
    let keep = usize::try_from(retention).unwrap_or(usize::MAX).min(extended.len());
    let surviving = extended.split_off(extended.len() - keep);
    Pruned { to_delete: extended, surviving }
}

#[cfg(test)]
#[path = "retention_tests.rs"]
mod tests;

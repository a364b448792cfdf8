// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn starts_clear() {
    let pending = PendingState::default();
    assert!(!pending.is_deferred());
    assert!(pending.replay().is_empty());
}

#[test]
fn defer_has_set_semantics() {
    let mut pending = PendingState::default();
    pending.defer(BackupClass::Daily);
    pending.defer(BackupClass::Daily);
    pending.defer(BackupClass::Monthly);

    assert!(pending.is_deferred());
    assert_eq!(pending.replay(), vec![BackupClass::Daily, BackupClass::Monthly]);
}

#[test]
fn consuming_last_class_clears_flag() {
    let mut pending = PendingState::default();
    pending.defer(BackupClass::Weekly);
    pending.defer(BackupClass::Monthly);

    assert!(pending.consume(BackupClass::Weekly));
    assert!(pending.is_deferred());
    assert!(!pending.contains(BackupClass::Weekly));

    assert!(pending.consume(BackupClass::Monthly));
    assert!(!pending.is_deferred());
    assert!(pending.replay().is_empty());
}

#[test]
fn consuming_undeferred_class_is_harmless() {
    let mut pending = PendingState::default();
    assert!(!pending.consume(BackupClass::Startup));
    pending.defer(BackupClass::Daily);
    assert!(!pending.consume(BackupClass::Startup));
    assert!(pending.is_deferred());
}

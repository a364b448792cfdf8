// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::local_hms;

#[yare::parameterized(
    named    = { Some("Voron"), BackupClass::Daily,   "Voron-daily-20261018-023005.zip" },
    unset    = { None,          BackupClass::Weekly,  "octoprint-weekly-20261018-023005.zip" },
    blank    = { Some("  "),    BackupClass::Monthly, "octoprint-monthly-20261018-023005.zip" },
    trimmed  = { Some(" mk3 "), BackupClass::Startup, "mk3-startup-20261018-023005.zip" },
)]
fn filename_convention(instance: Option<&str>, class: BackupClass, expected: &str) {
    let at = local_hms(2026, 10, 18, 2, 30, 5);
    assert_eq!(backup_filename(instance, DEFAULT_INSTANCE_NAME, class, at), expected);
}

#[test]
fn custom_fallback_is_used_when_unset() {
    let at = local_hms(2026, 1, 2, 3, 4, 5);
    assert_eq!(
        backup_filename(None, "printer", BackupClass::Daily, at),
        "printer-daily-20260102-030405.zip"
    );
}

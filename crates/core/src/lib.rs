// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bsched-core: Domain types for the backup scheduler

pub mod macros;

pub mod class;
pub mod clock;
pub mod event;
pub mod filename;
pub mod id;
pub mod policy;
pub mod trigger;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use class::{BackupClass, ParseClassError};
pub use clock::{Clock, FakeClock, SystemClock};
pub use event::{Event, OperationOutcome};
pub use filename::{backup_filename, DEFAULT_INSTANCE_NAME};
pub use policy::{
    Eligibility, Exclusion, NotificationSettings, PeriodicPolicies, Policy, TimeOfDay,
    TimeOfDayError,
};
pub use trigger::{TriggerId, TriggerKind};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bsched-engine: Backup scheduling runtime
//!
//! Arms daily wall-clock triggers from per-class policies, defers runs while
//! a print is active, creates backups through the host's engine, prunes old
//! artifacts by retention, and reports outcomes.

mod config;
pub mod env;
mod error;
pub mod gate;
pub mod logging;
mod report;
pub mod retention;
mod runtime;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use gate::PendingState;
pub use report::{Reporter, SuccessReport};
pub use retention::{prune, prune_existing, Pruned};
pub use runtime::{CompletedRun, RunOutcome, Runtime, RuntimeDeps};
pub use scheduler::Scheduler;

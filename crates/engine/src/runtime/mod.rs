// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime for the backup scheduler

mod handlers;
mod run;
mod schedule;

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::gate::PendingState;
use crate::report::Reporter;
use crate::scheduler::Scheduler;
use bsched_adapters::{ActivityAdapter, BackupAdapter, MailAdapter, NotifyAdapter, PolicyStore};
use bsched_core::{BackupClass, Clock, Eligibility, PeriodicPolicies, TriggerId};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::collections::HashSet;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Runtime adapter dependencies
pub struct RuntimeDeps<B, A, S, N, M> {
    pub backups: B,
    pub activity: A,
    pub store: S,
    pub notifier: N,
    pub mailer: M,
}

/// A backup that was created and recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRun {
    pub filename: String,
    /// Artifacts retention asked to delete, oldest first. Includes any whose
    /// deletion failed.
    pub deleted: Vec<String>,
}

/// Result of asking the runtime to run one class.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(CompletedRun),
    /// The policy did not allow a run today.
    Skipped(Eligibility),
    /// A print was active; the class will be replayed when it ends.
    Deferred,
    /// A run of the same class was already in flight.
    Busy,
    Failed(RuntimeError),
}

bsched_core::simple_display! {
    RunOutcome {
        Completed(..) => "completed",
        Skipped(..) => "skipped",
        Deferred => "deferred",
        Busy => "busy",
        Failed(..) => "failed",
    }
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }

    pub fn completed(&self) -> Option<&CompletedRun> {
        match self {
            RunOutcome::Completed(run) => Some(run),
            _ => None,
        }
    }
}

/// Scheduling state shared by the pump, event handlers, and runs.
#[derive(Default)]
struct SchedulerState {
    scheduler: Scheduler,
    pending: PendingState,
    /// Periodic policies as of the last (re)arm.
    snapshot: Option<PeriodicPolicies>,
}

/// Background tasks owned by the runtime.
#[derive(Default)]
struct Tasks {
    cancel: CancellationToken,
    pump: Option<JoinHandle<()>>,
    startup: Option<JoinHandle<()>>,
}

/// Runtime that arms triggers, gates runs on printer activity, and runs backups
pub struct Runtime<B, A, S, N, M, C: Clock> {
    backups: B,
    activity: A,
    store: S,
    reporter: Reporter<N, M>,
    clock: C,
    config: RuntimeConfig,
    state: Mutex<SchedulerState>,
    in_flight: Mutex<HashSet<BackupClass>>,
    tasks: Mutex<Tasks>,
}

impl<B, A, S, N, M, C> Runtime<B, A, S, N, M, C>
where
    B: BackupAdapter,
    A: ActivityAdapter,
    S: PolicyStore,
    N: NotifyAdapter,
    M: MailAdapter,
    C: Clock,
{
    /// Create a new runtime. Nothing is armed until `Startup` is handled.
    pub fn new(deps: RuntimeDeps<B, A, S, N, M>, clock: C, config: RuntimeConfig) -> Self {
        Self {
            backups: deps.backups,
            activity: deps.activity,
            store: deps.store,
            reporter: Reporter::new(deps.notifier, deps.mailer),
            clock,
            config,
            state: Mutex::new(SchedulerState::default()),
            in_flight: Mutex::new(HashSet::new()),
            tasks: Mutex::new(Tasks::default()),
        }
    }

    /// Ids of all armed triggers
    pub fn armed_triggers(&self) -> Vec<TriggerId> {
        self.state.lock().scheduler.armed()
    }

    /// Next fire time of the trigger for `class`, if armed
    pub fn next_fire(&self, class: BackupClass) -> Option<NaiveDateTime> {
        self.state.lock().scheduler.next_fire(TriggerId::backup(class).as_str())
    }

    /// Snapshot of deferred runs
    pub fn pending(&self) -> PendingState {
        self.state.lock().pending.clone()
    }

    /// Periodic policies captured at the last (re)arm
    pub fn snapshot(&self) -> Option<PeriodicPolicies> {
        self.state.lock().snapshot.clone()
    }

    pub fn is_in_flight(&self, class: BackupClass) -> bool {
        self.in_flight.lock().contains(&class)
    }

    pub fn is_pump_running(&self) -> bool {
        self.tasks.lock().pump.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Helper to lock scheduling state
    fn lock_state<T>(&self, f: impl FnOnce(&mut SchedulerState) -> T) -> T {
        let mut guard = self.state.lock();
        f(&mut guard)
    }
}

#[cfg(test)]
#[path = "../runtime_tests/mod.rs"]
mod tests;

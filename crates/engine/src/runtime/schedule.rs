// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger arming, the pump, the delayed startup run, and shutdown.

use super::{RunOutcome, Runtime};
use bsched_adapters::{ActivityAdapter, BackupAdapter, MailAdapter, NotifyAdapter, PolicyStore};
use bsched_core::trigger::BACKUP_TAG;
use bsched_core::{BackupClass, Clock, PeriodicPolicies, TriggerId};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;

impl<B, A, S, N, M, C> Runtime<B, A, S, N, M, C>
where
    B: BackupAdapter,
    A: ActivityAdapter,
    S: PolicyStore,
    N: NotifyAdapter,
    M: MailAdapter,
    C: Clock,
{
    /// Read the periodic policies from the store.
    pub fn read_policies(&self) -> PeriodicPolicies {
        PeriodicPolicies::read_with(|class| self.store.policy(class))
    }

    /// Cancel every backup trigger and arm one per scheduled periodic policy.
    ///
    /// Starts the pump if anything was armed. Returns how many triggers are
    /// now armed.
    pub fn reconfigure(self: &Arc<Self>, policies: PeriodicPolicies) -> usize {
        let now = self.clock.local_now();
        let (cancelled, armed) = self.lock_state(|s| {
            let cancelled = s.scheduler.cancel_tagged(BACKUP_TAG);
            let mut armed = 0;
            for (class, policy) in policies.iter().filter(|(_, p)| p.is_scheduled()) {
                if let Some(at) = policy.time_of_day {
                    s.scheduler.set_trigger(TriggerId::backup(class), at, now);
                    armed += 1;
                }
            }
            s.snapshot = Some(policies);
            (cancelled, armed)
        });
        tracing::info!(cancelled, armed, "backup triggers configured");

        if armed > 0 {
            self.ensure_pump();
        }
        armed
    }

    /// Run every class whose trigger is due. Called by the pump on each tick.
    pub async fn tick(&self) -> Vec<(BackupClass, RunOutcome)> {
        let now = self.clock.local_now();
        let fired = self.lock_state(|s| s.scheduler.fired_triggers(now));
        let mut outcomes = Vec::with_capacity(fired.len());
        for id in fired {
            let Some(kind) = id.kind() else {
                tracing::warn!(trigger = %id, "ignoring unrecognised trigger");
                continue;
            };
            let class = kind.class();
            tracing::debug!(trigger = %id, %class, "trigger fired");
            let outcome = self.run(class).await;
            outcomes.push((class, outcome));
        }
        outcomes
    }

    fn ensure_pump(self: &Arc<Self>) {
        let mut tasks = self.tasks.lock();
        if tasks.cancel.is_cancelled() || tasks.pump.as_ref().is_some_and(|h| !h.is_finished()) {
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("no async runtime available, backup pump not started");
            return;
        };

        let runtime = Arc::downgrade(self);
        let cancel = tasks.cancel.clone();
        let period = self.config.pump_interval;
        tasks.pump = Some(handle.spawn(async move {
            tracing::debug!(period_ms = period.as_millis() as u64, "backup pump started");
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                let Some(runtime) = Weak::upgrade(&runtime) else { break };
                runtime.tick().await;
            }
            tracing::debug!("backup pump stopped");
        }));
    }

    /// Run the startup class after the configured delay, off the caller's path.
    pub(crate) fn schedule_startup_run(self: &Arc<Self>) {
        let mut tasks = self.tasks.lock();
        if tasks.cancel.is_cancelled() {
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("no async runtime available, startup backup not scheduled");
            return;
        };

        let runtime = Arc::downgrade(self);
        let cancel = tasks.cancel.clone();
        let delay = self.config.startup_delay;
        tasks.startup = Some(handle.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            if let Some(runtime) = Weak::upgrade(&runtime) {
                let outcome = runtime.run(BackupClass::Startup).await;
                tracing::debug!(%outcome, "startup backup evaluated");
            }
        }));
    }

    /// Stop background tasks and disarm all triggers.
    ///
    /// A run already in progress finishes before this returns.
    pub async fn shutdown(&self) {
        let (pump, startup) = {
            let mut tasks = self.tasks.lock();
            tasks.cancel.cancel();
            (tasks.pump.take(), tasks.startup.take())
        };
        let cancelled = self.lock_state(|s| s.scheduler.cancel_tagged(BACKUP_TAG));
        for handle in [pump, startup].into_iter().flatten() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "background task ended abnormally");
            }
        }
        tracing::info!(cancelled, "backup scheduler stopped");
    }
}

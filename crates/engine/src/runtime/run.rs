// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backup orchestration: gate, eligibility, creation, retention, reporting.

use super::{CompletedRun, RunOutcome, Runtime};
use crate::error::RuntimeError;
use crate::report::SuccessReport;
use crate::retention::{prune, Pruned};
use bsched_adapters::{ActivityAdapter, BackupAdapter, MailAdapter, NotifyAdapter, PolicyStore};
use bsched_core::{backup_filename, BackupClass, Clock, Eligibility, Policy};
use parking_lot::Mutex;
use std::collections::HashSet;

/// Marks a class as in flight for as long as it is held.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<BackupClass>>,
    class: BackupClass,
}

impl<'a> InFlight<'a> {
    fn acquire(set: &'a Mutex<HashSet<BackupClass>>, class: BackupClass) -> Option<Self> {
        // Release the lock before a rejected guard could be dropped.
        let inserted = set.lock().insert(class);
        inserted.then(|| Self { set, class })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.class);
    }
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
    /// Run one class now, subject to the print gate and its policy.
    ///
    /// Failures are reported to the user and returned as
    /// [`RunOutcome::Failed`]; this never errors.
    pub async fn run(&self, class: BackupClass) -> RunOutcome {
        if self.activity.is_printing() {
            self.lock_state(|s| s.pending.defer(class));
            tracing::debug!(%class, "print in progress, deferring backup");
            return RunOutcome::Deferred;
        }

        let policy = self.store.policy(class);
        let eligibility = policy.eligibility(class, self.clock.today());
        // A deferral is spent by its first evaluation past the gate.
        self.lock_state(|s| s.pending.consume(class));
        match eligibility {
            Eligibility::Eligible => {}
            Eligibility::InvalidDay => {
                tracing::warn!(
                    %class,
                    weekday = policy.weekday,
                    day_of_month = policy.day_of_month,
                    "backup policy names a day that never occurs, not running"
                );
                return RunOutcome::Skipped(eligibility);
            }
            Eligibility::Disabled | Eligibility::WrongDay => {
                tracing::debug!(%class, %eligibility, "backup not run");
                return RunOutcome::Skipped(eligibility);
            }
        }

        let Some(_guard) = InFlight::acquire(&self.in_flight, class) else {
            tracing::debug!(%class, "backup already in flight");
            return RunOutcome::Busy;
        };

        let settings = self.store.notification_settings();
        match self.execute(class, &policy).await {
            Ok(run) => {
                let report = SuccessReport { class, filename: &run.filename, deleted: &run.deleted };
                self.reporter.success(settings, report).await;
                RunOutcome::Completed(run)
            }
            Err(e) => {
                tracing::error!(%class, error = %e, "backup failed");
                self.reporter.failure(settings, class, &e).await;
                RunOutcome::Failed(e)
            }
        }
    }

    async fn execute(&self, class: BackupClass, policy: &Policy) -> Result<CompletedRun, RuntimeError> {
        if !self.backups.destination_available().await {
            return Err(RuntimeError::DestinationMissing);
        }

        let instance = self.store.instance_name();
        let filename = backup_filename(
            instance.as_deref(),
            &self.config.default_instance_name,
            class,
            self.clock.local_now(),
        );
        let exclude = policy.exclusions();
        tracing::info!(%class, %filename, ?exclude, "creating backup");

        let started = self.clock.now();
        self.backups.create_backup(&exclude, &filename).await?;

        let history = self.store.history(class);
        let Pruned { to_delete, surviving } = prune(&history, &filename, policy.retention);
        for name in &to_delete {
            match self.backups.delete_backup(name).await {
                Ok(()) => tracing::debug!(%class, backup = %name, "old backup deleted"),
                Err(e) => tracing::warn!(%class, backup = %name, error = %e, "failed to delete old backup"),
            }
        }
        self.store.set_history(class, surviving);
        self.store.save()?;

        let elapsed_ms = self.clock.now().saturating_duration_since(started).as_millis() as u64;
        tracing::info!(%class, %filename, deleted = to_delete.len(), elapsed_ms, "backup complete");
        Ok(CompletedRun { filename, deleted: to_delete })
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host lifecycle event handling

use super::{RunOutcome, Runtime};
use bsched_adapters::{ActivityAdapter, BackupAdapter, MailAdapter, NotifyAdapter, PolicyStore};
use bsched_core::{BackupClass, Clock, Event};
use std::sync::Arc;

impl<B, A, S, N, M, C> Runtime<B, A, S, N, M, C>
where
    B: BackupAdapter,
    A: ActivityAdapter,
    S: PolicyStore,
    N: NotifyAdapter,
    M: MailAdapter,
    C: Clock,
{
    /// Handle one host event.
    ///
    /// Returns the outcomes of any runs performed inline. The startup run is
    /// scheduled in the background and never appears here.
    pub async fn handle_event(self: &Arc<Self>, event: Event) -> Vec<(BackupClass, RunOutcome)> {
        tracing::debug!(event = %event.log_summary(), "handling event");
        match event {
            Event::Startup => {
                self.reconfigure(self.read_policies());
                self.schedule_startup_run();
                Vec::new()
            }
            Event::ConfigurationChanged => {
                let policies = self.read_policies();
                let unchanged = self.lock_state(|s| s.snapshot.as_ref() == Some(&policies));
                if unchanged {
                    tracing::debug!("backup policies unchanged");
                } else {
                    self.reconfigure(policies);
                }
                Vec::new()
            }
            Event::ProtectedOperationEnded { outcome } => {
                let replay = self.lock_state(|s| s.pending.replay());
                if !replay.is_empty() {
                    tracing::info!(%outcome, classes = ?replay, "print ended, running deferred backups");
                }
                let mut outcomes = Vec::with_capacity(replay.len());
                for class in replay {
                    let result = self.run(class).await;
                    outcomes.push((class, result));
                }
                outcomes
            }
            Event::RunRequested { class } => vec![(class, self.run(class).await)],
        }
    }
}

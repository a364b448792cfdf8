//! Shared fixtures for the behavioral specs.

pub use bsched_adapters::{
    FakeActivityAdapter, FakeBackupAdapter, FakeMailAdapter, FakeNotifyAdapter, FakePolicyStore,
    NotifyKind, PolicyStore,
};
pub use bsched_core::test_support::{at, local, scheduled};
pub use bsched_core::{BackupClass, Event, FakeClock, OperationOutcome, Policy};
pub use bsched_engine::{RunOutcome, Runtime, RuntimeConfig, RuntimeDeps};
pub use similar_asserts::assert_eq;
pub use std::sync::Arc;

pub type HostRuntime = Runtime<
    FakeBackupAdapter,
    FakeActivityAdapter,
    FakePolicyStore,
    FakeNotifyAdapter,
    FakeMailAdapter,
    FakeClock,
>;

/// A simulated host: the scheduler plus every collaborator it talks to.
pub struct Host {
    pub scheduler: Arc<HostRuntime>,
    pub clock: FakeClock,
    pub backups: FakeBackupAdapter,
    pub printer: FakeActivityAdapter,
    pub settings: FakePolicyStore,
    pub notifications: FakeNotifyAdapter,
    pub mail: FakeMailAdapter,
}

impl Host {
    pub fn at(now: chrono::NaiveDateTime) -> Self {
        let clock = FakeClock::at(now);
        let backups = FakeBackupAdapter::new();
        let printer = FakeActivityAdapter::new();
        let settings = FakePolicyStore::new();
        let notifications = FakeNotifyAdapter::new();
        let mail = FakeMailAdapter::new();
        let scheduler = Runtime::new(
            RuntimeDeps {
                backups: backups.clone(),
                activity: printer.clone(),
                store: settings.clone(),
                notifier: notifications.clone(),
                mailer: mail.clone(),
            },
            clock.clone(),
            RuntimeConfig::default(),
        );
        Host { scheduler: Arc::new(scheduler), clock, backups, printer, settings, notifications, mail }
    }

    pub fn configure(&self, class: BackupClass, policy: Policy) {
        self.settings.set_policy(class, policy);
    }

    pub async fn send(&self, event: Event) -> Vec<(BackupClass, RunOutcome)> {
        self.scheduler.handle_event(event).await
    }

    /// Move the wall clock to `now` and let the pump evaluate triggers.
    pub async fn pump_at(&self, now: chrono::NaiveDateTime) -> Vec<(BackupClass, RunOutcome)> {
        self.clock.set_local(now);
        self.scheduler.tick().await
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host activity query: is the protected operation running?

/// Reports whether a protected operation (a print job) is in progress.
///
/// Backups never start while this returns `true`; they are deferred until
/// the host signals the operation ended.
pub trait ActivityAdapter: Clone + Send + Sync + 'static {
    fn is_printing(&self) -> bool;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::ActivityAdapter;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Fake activity adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeActivityAdapter {
        printing: Arc<AtomicBool>,
    }

    impl FakeActivityAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_printing(&self, printing: bool) {
            self.printing.store(printing, Ordering::SeqCst);
        }
    }

    impl ActivityAdapter for FakeActivityAdapter {
        fn is_printing(&self) -> bool {
            self.printing.load(Ordering::SeqCst)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeActivityAdapter;

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;

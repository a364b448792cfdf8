// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Optional email transport for backup reports.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the mail transport
#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport not configured")]
    NotConfigured,
    #[error("mail delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Adapter for sending report emails
#[async_trait]
pub trait MailAdapter: Clone + Send + Sync + 'static {
    async fn send_email(&self, subject: &str, html_body: &str) -> Result<(), MailError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{MailAdapter, MailError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded email
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct MailCall {
        pub subject: String,
        pub html_body: String,
    }

    #[derive(Default)]
    struct FakeMailState {
        calls: Vec<MailCall>,
        fail: bool,
    }

    /// Fake mail transport for testing
    #[derive(Clone, Default)]
    pub struct FakeMailAdapter {
        inner: Arc<Mutex<FakeMailState>>,
    }

    impl FakeMailAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent send fail without recording it
        pub fn set_fail(&self, fail: bool) {
            self.inner.lock().fail = fail;
        }

        /// Get all delivered emails
        pub fn calls(&self) -> Vec<MailCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl MailAdapter for FakeMailAdapter {
        async fn send_email(&self, subject: &str, html_body: &str) -> Result<(), MailError> {
            let mut inner = self.inner.lock();
            if inner.fail {
                return Err(MailError::DeliveryFailed("connection refused".to_string()));
            }
            inner
                .calls
                .push(MailCall { subject: subject.to_string(), html_body: html_body.to_string() });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeMailAdapter, MailCall};

#[cfg(test)]
#[path = "mail_tests.rs"]
mod tests;

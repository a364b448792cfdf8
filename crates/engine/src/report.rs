// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome reporting over notifications and optional email.
//!
//! Every run outcome goes to the same notification slot, so the latest
//! result replaces earlier ones instead of piling up. Transport failures
//! never propagate. A failed notification or email is logged and turned into
//! one best-effort error notification.

use crate::error::RuntimeError;
use bsched_adapters::{MailAdapter, NotifyAdapter, NotifyKind, NotifySlot};
use bsched_core::{BackupClass, NotificationSettings};

/// Sends run outcomes to the user.
#[derive(Clone)]
pub struct Reporter<N, M> {
    notifier: N,
    mailer: M,
}

/// What a successful run did, for the report body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessReport<'a> {
    pub class: BackupClass,
    pub filename: &'a str,
    pub deleted: &'a [String],
}

impl<N: NotifyAdapter, M: MailAdapter> Reporter<N, M> {
    pub fn new(notifier: N, mailer: M) -> Self {
        Self { notifier, mailer }
    }

    pub async fn success(&self, settings: NotificationSettings, report: SuccessReport<'_>) {
        let message = format!("{} backup {} created.", capitalized(report.class), report.filename);
        if settings.notify_on_success {
            self.outcome(NotifyKind::Info, &message, false).await;
        }
        if settings.email_on_success {
            let subject = format!("Backup Scheduler: {} backup created", report.class);
            self.email(&subject, &success_html(&report)).await;
        }
    }

    pub async fn failure(
        &self,
        settings: NotificationSettings,
        class: BackupClass,
        error: &RuntimeError,
    ) {
        let message = error.user_message();
        self.outcome(NotifyKind::Error, &message, true).await;
        if settings.email_on_failure {
            let subject = format!("Backup Scheduler: {class} backup failed");
            self.email(&subject, &failure_html(class, &message)).await;
        }
    }

    async fn outcome(&self, kind: NotifyKind, message: &str, retain: bool) {
        let slot = Some(NotifySlot::Outcome);
        if let Err(e) = self.notifier.notify(kind, message, retain, slot).await {
            tracing::warn!(%kind, error = %e, "notification failed");
            self.secondary(&format!("Backup Scheduler could not show a notification: {e}")).await;
        }
    }

    async fn email(&self, subject: &str, html_body: &str) {
        if let Err(e) = self.mailer.send_email(subject, html_body).await {
            tracing::warn!(subject, error = %e, "report email failed");
            self.secondary(&format!("Backup Scheduler could not send email: {e}")).await;
        }
    }

    async fn secondary(&self, message: &str) {
        if let Err(e) = self.notifier.notify(NotifyKind::Error, message, true, None).await {
            tracing::warn!(error = %e, "secondary error notification failed");
        }
    }
}

fn capitalized(class: BackupClass) -> String {
    let name = class.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn success_html(report: &SuccessReport<'_>) -> String {
    let mut body = format!(
        "<p>{} backup <b>{}</b> was created.</p>",
        capitalized(report.class),
        escape(report.filename)
    );
    if !report.deleted.is_empty() {
        body.push_str("<p>Removed by retention:</p><ul>");
        for name in report.deleted {
            body.push_str(&format!("<li>{}</li>", escape(name)));
        }
        body.push_str("</ul>");
    }
    body
}

fn failure_html(class: BackupClass, message: &str) -> String {
    format!("<p>{} backup failed.</p><p>{}</p>", capitalized(class), escape(message))
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

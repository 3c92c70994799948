//! Email sink: sends the finished report as one plain-text message

use super::{DeliveryOutcome, ReportSink};
use crate::adapters::smtp::{Mailer, OutgoingMessage};
use crate::config::SmtpConfig;
use crate::core::report::ReportDocument;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};

/// Sends the report once all lines are in
///
/// Send failures are logged and returned as [`DeliveryOutcome::Failed`];
/// they never abort the run.
pub struct EmailSink<M: Mailer> {
    mailer: M,
    sender: String,
    recipient: String,
    subject_prefix: String,
    date: Option<NaiveDate>,
}

impl<M: Mailer> EmailSink<M> {
    pub fn new(mailer: M, config: &SmtpConfig) -> Self {
        Self {
            mailer,
            sender: config.sender.clone(),
            recipient: config.recipient.clone(),
            subject_prefix: config.subject_prefix.clone(),
            date: None,
        }
    }

    /// Overrides the recipient from configuration
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    /// Pins the subject date instead of using today's local date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// `"{prefix} - YYYY-MM-DD"`
    pub fn subject(&self) -> String {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        format!("{} - {}", self.subject_prefix, date.format("%Y-%m-%d"))
    }
}

#[async_trait]
impl<M: Mailer> ReportSink for EmailSink<M> {
    async fn deliver(&mut self, document: &ReportDocument) -> Result<DeliveryOutcome> {
        let message = OutgoingMessage {
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            subject: self.subject(),
            body: document.render(),
        };

        match self.mailer.send(&message).await {
            Ok(()) => {
                tracing::info!(
                    recipient = %message.recipient,
                    subject = %message.subject,
                    "Report email sent"
                );
                Ok(DeliveryOutcome::Delivered)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to send report email");
                Ok(DeliveryOutcome::Failed(e))
            }
        }
    }
}

//! Integration tests for email delivery and the delivery exit-code policy

use async_trait::async_trait;
use cdp_report::adapters::cdp::ProfileSource;
use cdp_report::adapters::smtp::{Mailer, OutgoingMessage, SmtpMailer};
use cdp_report::config::{ReportSettings, SmtpConfig};
use cdp_report::core::delivery::{DeliveryOutcome, DeliveryPolicy, EmailSink};
use cdp_report::core::report::{generate_report, ReportCatalog};
use cdp_report::domain::{
    CdpError, DeliveryError, ProfileQuery, ProfileRecord, QueryResult, Result,
};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

struct FixedSource {
    fail: bool,
}

#[async_trait]
impl ProfileSource for FixedSource {
    async fn query(&self, _query: &ProfileQuery) -> Result<QueryResult> {
        if self.fail {
            return Err(CdpError::Schema("Profiles array not found in response.".to_string()).into());
        }
        Ok(QueryResult::new(1, vec![ProfileRecord::with_crm_id("111")]))
    }
}

#[derive(Clone, Default)]
struct FakeMailer {
    sent: Arc<Mutex<Vec<OutgoingMessage>>>,
    reject: bool,
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, message: &OutgoingMessage) -> std::result::Result<(), DeliveryError> {
        if self.reject {
            return Err(DeliveryError::Send(
                "535 5.7.3 Authentication unsuccessful".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

fn smtp_config() -> SmtpConfig {
    SmtpConfig {
        sender: "reports@example.com".to_string(),
        recipient: "team@example.com".to_string(),
        ..Default::default()
    }
}

fn catalog() -> ReportCatalog {
    ReportCatalog::build(&ReportSettings::default())
}

#[tokio::test]
async fn test_report_is_emailed_once_complete() {
    let mailer = FakeMailer::default();
    let mut sink = EmailSink::new(mailer.clone(), &smtp_config())
        .with_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());

    let outcome = generate_report(&FixedSource { fail: false }, &catalog(), &mut sink)
        .await
        .unwrap();
    assert_eq!(outcome, DeliveryOutcome::Delivered);

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Daily UC1 Report - 2026-10-16");
    assert!(sent[0]
        .body
        .starts_with("UC1 Report (Only GB and IE users considered):\n\n### General User Stats: ###\n"));
    assert_eq!(sent[0].body.matches("\t(111)").count(), 38);
}

#[tokio::test]
async fn test_auth_failure_is_swallowed_by_default() {
    let mailer = FakeMailer {
        reject: true,
        ..Default::default()
    };
    let mut sink = EmailSink::new(mailer, &smtp_config());

    let outcome = generate_report(&FixedSource { fail: false }, &catalog(), &mut sink)
        .await
        .unwrap();

    assert!(matches!(outcome, DeliveryOutcome::Failed(DeliveryError::Send(_))));
    assert_eq!(DeliveryPolicy::default().exit_code(&outcome), 0);
    assert_eq!(DeliveryPolicy::new(true).exit_code(&outcome), 1);
}

#[tokio::test]
async fn test_nothing_is_sent_when_a_query_fails() {
    let mailer = FakeMailer::default();
    let mut sink = EmailSink::new(mailer.clone(), &smtp_config());

    let result = generate_report(&FixedSource { fail: true }, &catalog(), &mut sink).await;

    assert!(result.is_err());
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_relay_is_a_failed_outcome() {
    let config = SmtpConfig {
        host: "127.0.0.1".to_string(),
        port: 9,
        timeout_seconds: Some(5),
        ..smtp_config()
    };
    let mut sink = EmailSink::new(SmtpMailer::new(&config), &config);

    let outcome = generate_report(&FixedSource { fail: false }, &catalog(), &mut sink)
        .await
        .unwrap();

    assert!(matches!(outcome, DeliveryOutcome::Failed(_)));
}

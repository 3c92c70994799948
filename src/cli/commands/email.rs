//! Email command implementation
//!
//! Runs the full report and sends it as one plain-text message. A failed
//! send is reported on stdout and only changes the exit code when delivery
//! failures are escalated.

use crate::adapters::cdp::ProfileSource;
use crate::adapters::smtp::{Mailer, SmtpMailer};
use crate::config::ReportConfig;
use crate::core::delivery::{DeliveryOutcome, DeliveryPolicy, EmailSink};
use crate::core::report::{generate_report, ReportCatalog};
use clap::Args;

/// Arguments for the email command
#[derive(Args, Debug)]
pub struct EmailArgs {
    /// Exit with code 1 when the email cannot be sent
    #[arg(long)]
    pub fail_on_delivery_error: bool,

    /// Send to this address instead of the configured recipient
    #[arg(long)]
    pub to: Option<String>,
}

impl EmailArgs {
    /// Execute the email command
    pub async fn execute(&self, config: &ReportConfig) -> anyhow::Result<i32> {
        let Some(client) = super::cdp_client(config) else {
            return Ok(2);
        };

        self.run(config, &client, SmtpMailer::new(&config.smtp)).await
    }

    /// Generates the report from `source` and sends it through `mailer`
    async fn run<M: Mailer>(
        &self,
        config: &ReportConfig,
        source: &dyn ProfileSource,
        mailer: M,
    ) -> anyhow::Result<i32> {
        let catalog = ReportCatalog::build(&config.report);

        let mut sink = EmailSink::new(mailer, &config.smtp);
        if let Some(ref to) = self.to {
            sink = sink.with_recipient(to.clone());
        }

        tracing::info!(
            recipient = %sink.recipient(),
            host = %config.smtp.host,
            "Generating report for email delivery"
        );

        let outcome = generate_report(source, &catalog, &mut sink).await?;

        match outcome {
            DeliveryOutcome::Delivered => println!("✅ Email sent successfully!"),
            DeliveryOutcome::Failed(ref e) => println!("❌ Failed to send email. Error: {e}"),
        }

        let policy = self.policy(config);
        Ok(policy.exit_code(&outcome))
    }

    fn policy(&self, config: &ReportConfig) -> DeliveryPolicy {
        DeliveryPolicy::new(config.delivery.fail_on_error || self.fail_on_delivery_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::smtp::OutgoingMessage;
    use crate::config::DeliveryConfig;
    use crate::domain::{
        CdpError, DeliveryError, ProfileQuery, ProfileRecord, QueryResult, ReportError, Result,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct FixedSource {
        fail: bool,
    }

    #[async_trait]
    impl ProfileSource for FixedSource {
        async fn query(&self, _query: &ProfileQuery) -> Result<QueryResult> {
            if self.fail {
                return Err(CdpError::Upstream {
                    status: 503,
                    body: "unavailable".to_string(),
                }
                .into());
            }
            Ok(QueryResult::new(2, vec![ProfileRecord::with_crm_id("111")]))
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
            self.sent.lock().unwrap().push(message.clone());
            if self.reject {
                return Err(DeliveryError::Send(
                    "535 5.7.3 Authentication unsuccessful".to_string(),
                ));
            }
            Ok(())
        }
    }

    fn args(fail_on_delivery_error: bool) -> EmailArgs {
        EmailArgs {
            fail_on_delivery_error,
            to: None,
        }
    }

    fn config() -> ReportConfig {
        let mut config = ReportConfig::default();
        config.smtp.sender = "reports@example.com".to_string();
        config.smtp.recipient = "team@example.com".to_string();
        config
    }

    #[tokio::test]
    async fn test_run_exits_zero_when_sent() {
        let mailer = FakeMailer::default();
        let code = args(false)
            .run(&config(), &FixedSource { fail: false }, mailer.clone())
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_auth_failure_exit_code_follows_policy() {
        let mailer = FakeMailer {
            reject: true,
            ..Default::default()
        };

        let lenient = args(false)
            .run(&config(), &FixedSource { fail: false }, mailer.clone())
            .await
            .unwrap();
        assert_eq!(lenient, 0);

        let strict = args(true)
            .run(&config(), &FixedSource { fail: false }, mailer.clone())
            .await
            .unwrap();
        assert_eq!(strict, 1);

        let mut escalated = config();
        escalated.delivery.fail_on_error = true;
        let from_config = args(false)
            .run(&escalated, &FixedSource { fail: false }, mailer.clone())
            .await
            .unwrap();
        assert_eq!(from_config, 1);
        assert_eq!(mailer.sent.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_run_with_recipient_override() {
        let mailer = FakeMailer::default();
        let cmd = EmailArgs {
            fail_on_delivery_error: false,
            to: Some("ops@example.com".to_string()),
        };

        cmd.run(&config(), &FixedSource { fail: false }, mailer.clone())
            .await
            .unwrap();

        assert_eq!(mailer.sent.lock().unwrap()[0].recipient, "ops@example.com");
    }

    #[tokio::test]
    async fn test_run_query_failure_sends_nothing() {
        let mailer = FakeMailer::default();
        let err = args(true)
            .run(&config(), &FixedSource { fail: true }, mailer.clone())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::Cdp(CdpError::Upstream { status: 503, .. }))
        ));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_policy_from_flag_or_config() {
        let config = ReportConfig::default();
        let lenient = EmailArgs {
            fail_on_delivery_error: false,
            to: None,
        };
        let strict = EmailArgs {
            fail_on_delivery_error: true,
            to: None,
        };

        assert!(!lenient.policy(&config).fail_on_error);
        assert!(strict.policy(&config).fail_on_error);

        let config = ReportConfig {
            delivery: DeliveryConfig {
                fail_on_error: true,
            },
            ..Default::default()
        };
        assert!(lenient.policy(&config).fail_on_error);
    }
}

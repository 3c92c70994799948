//! SMTP mailer backed by lettre
//!
//! Each send opens its own STARTTLS session, logs in with the configured
//! user name and password, submits one message and closes the session.

use super::mailer::{Mailer, OutgoingMessage};
use crate::config::{SecretString, SmtpConfig};
use crate::domain::DeliveryError;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Mailer for an authenticated STARTTLS relay
pub struct SmtpMailer {
    host: String,
    port: u16,
    username: String,
    password: SecretString,
    timeout: Option<Duration>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            username: config.username.clone(),
            password: config.password.clone(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
        }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, DeliveryError> {
        let password: &str = self.password.expose_secret().as_ref();
        let credentials = Credentials::new(self.username.clone(), password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| DeliveryError::Connection(e.to_string()))?
            .port(self.port)
            .credentials(credentials)
            .timeout(self.timeout)
            .build();

        Ok(transport)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        let email = build_message(message)?;
        let transport = self.transport()?;

        tracing::debug!(
            host = %self.host,
            port = self.port,
            recipient = %message.recipient,
            "Submitting report email"
        );

        transport
            .send(email)
            .await
            .map_err(|e| DeliveryError::Send(e.to_string()))?;

        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, DeliveryError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| DeliveryError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Assembles the plain-text message
fn build_message(message: &OutgoingMessage) -> Result<Message, DeliveryError> {
    Message::builder()
        .from(parse_mailbox(&message.sender)?)
        .to(parse_mailbox(&message.recipient)?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| DeliveryError::Message(e.to_string()))
}

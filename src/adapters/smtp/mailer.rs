//! Mailer trait and the outgoing message it sends

use crate::domain::DeliveryError;
use async_trait::async_trait;

/// A single plain-text message to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Sends one message per call over a fresh session
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DeliveryError>;
}

//! SMTP adapter for emailing the finished report

pub mod client;
pub mod mailer;

pub use client::SmtpMailer;
pub use mailer::{Mailer, OutgoingMessage};

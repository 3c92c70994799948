//! Customer Data Platform adapter

pub mod client;
pub mod source;

pub use client::CdpClient;
pub use source::ProfileSource;

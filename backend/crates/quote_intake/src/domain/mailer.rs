//! Mailer port
//!
//! Interface to the outbound mail relay. Implementation is in the
//! infrastructure layer.

use std::time::Duration;
use thiserror::Error;

/// Connection details of the mail relay
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpEndpoint {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Bounds on a single delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailTimeouts {
    /// Establishing the TCP (and TLS) connection
    pub connect: Duration,
    /// Waiting for the relay's greeting banner
    pub greeting: Duration,
    /// Any single read or write once connected
    pub socket: Duration,
}

impl Default for MailTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            greeting: Duration::from_secs(10),
            socket: Duration::from_secs(15),
        }
    }
}

impl MailTimeouts {
    /// Upper bound for a whole delivery attempt
    pub fn total(&self) -> Duration {
        self.connect + self.greeting + self.socket
    }
}

/// A fully composed notification, ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Delivery failure
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Message building error: {0}")]
    Message(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Delivery timed out after {0:?}")]
    Timeout(Duration),
}

/// Mail relay port
#[trait_variant::make(QuoteMailer: Send)]
pub trait LocalQuoteMailer {
    /// Deliver one message through the given relay
    async fn send(&self, endpoint: &SmtpEndpoint, mail: &OutgoingMail) -> Result<(), MailError>;
}

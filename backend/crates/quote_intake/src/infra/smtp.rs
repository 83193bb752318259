//! SMTP mailer implementation
//!
//! Delivers notifications through the configured relay with lettre. A
//! transport is built per delivery from the endpoint it is handed, since
//! the relay settings are only known once a request reaches the send step.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::mailer::{MailError, MailTimeouts, OutgoingMail, QuoteMailer, SmtpEndpoint};

/// Port of SMTP over implicit TLS
pub const IMPLICIT_TLS_PORT: u16 = 465;
/// Mail submission port, STARTTLS mandatory
pub const SUBMISSION_PORT: u16 = 587;

/// Transport security negotiated with the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// TLS from the first byte
    Implicit,
    /// Plain connection upgraded with STARTTLS; fails if unsupported
    Required,
    /// STARTTLS when the relay offers it
    Opportunistic,
}

impl TlsMode {
    pub fn for_port(port: u16) -> Self {
        match port {
            IMPLICIT_TLS_PORT => TlsMode::Implicit,
            SUBMISSION_PORT => TlsMode::Required,
            _ => TlsMode::Opportunistic,
        }
    }
}

/// lettre-backed [`QuoteMailer`]
#[derive(Debug, Clone, Default)]
pub struct SmtpQuoteMailer {
    timeouts: MailTimeouts,
}

impl SmtpQuoteMailer {
    pub fn new(timeouts: MailTimeouts) -> Self {
        Self { timeouts }
    }

    fn transport(
        &self,
        endpoint: &SmtpEndpoint,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let params = TlsParameters::new(endpoint.host.clone())
            .map_err(|e| MailError::Transport(e.to_string()))?;
        let tls = match TlsMode::for_port(endpoint.port) {
            TlsMode::Implicit => Tls::Wrapper(params),
            TlsMode::Required => Tls::Required(params),
            TlsMode::Opportunistic => Tls::Opportunistic(params),
        };

        // lettre applies one timeout to connecting and to every command,
        // the greeting included; the longest bound covers all three.
        let timeout = self
            .timeouts
            .socket
            .max(self.timeouts.connect)
            .max(self.timeouts.greeting);

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(endpoint.host.as_str())
                .port(endpoint.port)
                .tls(tls)
                .credentials(Credentials::new(
                    endpoint.username.clone(),
                    endpoint.password.clone(),
                ))
                .timeout(Some(timeout))
                .build(),
        )
    }
}

/// Build the multipart message for a composed notification
///
/// An unparseable reply-to is dropped rather than failing the delivery.
pub fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
    let from_address: Address = mail
        .from_address
        .parse()
        .map_err(|e: lettre::address::AddressError| {
            MailError::Address(format!("invalid from address: {e}"))
        })?;
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e: lettre::address::AddressError| {
            MailError::Address(format!("invalid recipient address: {e}"))
        })?;

    let mut builder = Message::builder()
        .from(Mailbox::new(Some(mail.from_name.clone()), from_address))
        .to(to)
        .subject(mail.subject.as_str());

    if let Some(reply_to) = mail.reply_to.as_deref() {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => tracing::warn!(error = %e, "Reply-To not representable, omitted"),
        }
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            mail.text_body.clone(),
            mail.html_body.clone(),
        ))
        .map_err(|e| MailError::Message(e.to_string()))
}

impl QuoteMailer for SmtpQuoteMailer {
    async fn send(&self, endpoint: &SmtpEndpoint, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = build_message(mail)?;
        let transport = self.transport(endpoint)?;

        let response = transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::debug!(
            host = %endpoint.host,
            port = endpoint.port,
            code = %response.code(),
            "Relay accepted notification"
        );
        Ok(())
    }
}

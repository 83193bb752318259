//! Submit Quote Use Case
//!
//! One request runs through an ordered sequence of checks. The first
//! failing check ends the request with its reason:
//!
//! 1. parse the body
//! 2. rate limit the client (records the attempt when allowed)
//! 3. honeypot (silent success, nothing sent)
//! 4. required fields
//! 5. email shape
//! 6. link spam
//! 7. mail relay configuration
//! 8. compose and send
//!
//! The rate limit runs before everything that inspects the content, so an
//! invalid submission still consumes the client's slot and a bot tripping
//! the honeypot is throttled like anyone else.

use kernel::QuoteSubmission;
use platform::client::ClientAddress;
use platform::clock::Clock;
use platform::rate_limit::RateLimitStore;
use std::sync::Arc;

use crate::application::config::QuoteConfig;
use crate::domain::entities::{ContactDetails, is_spam};
use crate::domain::mailer::{MailError, OutgoingMail, QuoteMailer};
use crate::domain::notification::QuoteNotification;
use crate::error::{QuoteError, QuoteResult};

/// How an accepted request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitQuoteOutcome {
    /// Notification handed to the relay
    Delivered,
    /// Honeypot filled; reported as success, nothing sent
    HoneypotDiscarded,
}

/// Submit Quote Use Case
pub struct SubmitQuoteUseCase<R, M>
where
    R: RateLimitStore,
    M: QuoteMailer,
{
    rate_limiter: Arc<R>,
    mailer: Arc<M>,
    clock: Arc<dyn Clock>,
    config: Arc<QuoteConfig>,
}

impl<R, M> SubmitQuoteUseCase<R, M>
where
    R: RateLimitStore,
    M: QuoteMailer,
{
    pub fn new(
        rate_limiter: Arc<R>,
        mailer: Arc<M>,
        clock: Arc<dyn Clock>,
        config: Arc<QuoteConfig>,
    ) -> Self {
        Self {
            rate_limiter,
            mailer,
            clock,
            config,
        }
    }

    pub async fn execute(
        &self,
        payload: &[u8],
        client: &ClientAddress,
    ) -> QuoteResult<SubmitQuoteOutcome> {
        let submission = QuoteSubmission::from_json_slice(payload)?;

        let decision = self
            .rate_limiter
            .check_and_record(client.as_str(), self.clock.now_ms())
            .await;
        if !decision.allowed {
            tracing::warn!(client = %client, "Quote rate limited");
            return Err(QuoteError::RateLimited {
                retry_after_ms: decision.retry_after_ms,
            });
        }

        if submission.is_honeypot_filled() {
            tracing::info!(client = %client, "Quote honeypot filled, discarding");
            return Ok(SubmitQuoteOutcome::HoneypotDiscarded);
        }

        let contact = ContactDetails::validate(&submission)?;

        if is_spam(&submission) {
            return Err(QuoteError::SpamDetected);
        }

        let resolved = self
            .config
            .mail
            .resolve()
            .map_err(QuoteError::SmtpNotConfigured)?;

        let notification = QuoteNotification::compose(&submission, &contact, client);
        let mail = OutgoingMail {
            from_name: self.config.sender_name.clone(),
            from_address: resolved.from,
            to: resolved.to,
            reply_to: Some(contact.email.clone()),
            subject: self.config.subject.clone(),
            text_body: notification.text_body(),
            html_body: notification.html_body(),
        };

        let bound = self.config.timeouts.total();
        match tokio::time::timeout(bound, self.mailer.send(&resolved.endpoint, &mail)).await {
            Ok(result) => result?,
            Err(_) => return Err(MailError::Timeout(bound).into()),
        }

        tracing::info!(client = %client, "Quote notification sent");
        Ok(SubmitQuoteOutcome::Delivered)
    }
}

//! Quote Intake Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Contact rules, notification rendering, mailer port
//! - `application/` - Configuration and the submit-quote use case
//! - `infra/` - SMTP mailer
//! - `presentation/` - HTTP handlers
//!
//! ## Abuse Model
//! - One accepted submission per client address per window, process-local
//! - Honeypot submissions are answered with success and dropped
//! - Reason codes reach the client; transport and configuration details
//!   only reach the logs

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{MailSettings, QuoteConfig};
pub use application::submit_quote::{SubmitQuoteOutcome, SubmitQuoteUseCase};
pub use error::{QuoteError, QuoteResult};
pub use infra::smtp::SmtpQuoteMailer;
pub use presentation::handlers::QuoteAppState;
pub use presentation::router::{quote_router, quote_router_generic};

// Re-export kernel types shared with the form
pub use kernel::{ErrorKind, QuoteResponse, QuoteSubmission, ReasonCode};

#[cfg(test)]
mod tests;

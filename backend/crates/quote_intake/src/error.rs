//! Quote Error Types
//!
//! Every rejection maps to one [`ReasonCode`] and a fixed status. The
//! response body carries only the code; details stay in the logs.

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::rules::{RequiredField, RuleViolation};
use kernel::{ErrorKind, QuoteResponse, ReasonCode};
use thiserror::Error;

use crate::domain::mailer::MailError;

/// Quote-specific result type alias
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Quote intake error variants
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Body is not a JSON object of the expected shape
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// Same client submitted inside the window
    #[error("Rate limit exceeded, retry after {retry_after_ms} ms")]
    RateLimited { retry_after_ms: i64 },

    /// A required field is absent or blank
    #[error("Missing required field: {0}")]
    Validation(RequiredField),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Message rejected as link spam")]
    SpamDetected,

    /// Mail relay settings absent from the environment
    #[error("SMTP not configured, missing: {}", .0.join(", "))]
    SmtpNotConfigured(Vec<&'static str>),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] MailError),
}

impl QuoteError {
    /// Wire code reported to the client
    pub fn reason(&self) -> ReasonCode {
        match self {
            QuoteError::InvalidJson(_) => ReasonCode::InvalidJson,
            QuoteError::RateLimited { .. } => ReasonCode::RateLimited,
            QuoteError::Validation(_) => ReasonCode::ValidationError,
            QuoteError::InvalidEmail => ReasonCode::InvalidEmail,
            QuoteError::SpamDetected => ReasonCode::SpamDetected,
            QuoteError::SmtpNotConfigured(_) => ReasonCode::SmtpNotConfigured,
            QuoteError::Smtp(_) => ReasonCode::SmtpError,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        self.reason().kind()
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        self.kind().http_status()
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QuoteError::Smtp(e) => {
                tracing::error!(error = %e, "Quote notification delivery failed");
            }
            QuoteError::SmtpNotConfigured(missing) => {
                tracing::error!(missing = ?missing, "Quote mail relay not configured");
            }
            QuoteError::RateLimited { retry_after_ms } => {
                tracing::warn!(retry_after_ms, "Quote rate limit exceeded");
            }
            QuoteError::SpamDetected => {
                tracing::warn!("Quote rejected as spam");
            }
            _ => {
                tracing::debug!(error = %self, "Quote rejected");
            }
        }
    }
}

impl From<RuleViolation> for QuoteError {
    fn from(violation: RuleViolation) -> Self {
        match violation {
            RuleViolation::Missing(field) => QuoteError::Validation(field),
            RuleViolation::InvalidEmail => QuoteError::InvalidEmail,
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::InvalidJson(err.to_string())
    }
}

/// Body that could not be buffered, e.g. over the size limit
impl From<BytesRejection> for QuoteError {
    fn from(rejection: BytesRejection) -> Self {
        QuoteError::InvalidJson(rejection.body_text())
    }
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        (status, Json(QuoteResponse::rejected(self.reason()))).into_response()
    }
}

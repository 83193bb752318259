//! Quote wire model
//!
//! The JSON exchanged on `POST /api/quote`. Every submission field is
//! optional on the wire; [`crate::rules`] decides which ones are mandatory.

use serde::{Deserialize, Serialize};

use crate::error::kind::ErrorKind;
use crate::rules::{QuoteDraft, RequiredField};

/// Quote request as posted by the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff: Option<String>,
    /// Free-form, never parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Free-form, never parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passengers: Option<Passengers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Honeypot: hidden in the form, only bots fill it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Two-letter locale tag, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl QuoteSubmission {
    /// Decode a request body.
    ///
    /// The body must be a JSON object; `null`, arrays and scalars are
    /// rejected like malformed JSON.
    pub fn from_json_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(payload)?;
        if !value.is_object() {
            return Err(<serde_json::Error as serde::de::Error>::custom(
                "quote payload must be a JSON object",
            ));
        }
        serde_json::from_value(value)
    }

    /// True when the honeypot field carries anything but whitespace
    pub fn is_honeypot_filled(&self) -> bool {
        self.company
            .as_deref()
            .is_some_and(|company| !company.trim().is_empty())
    }
}

impl QuoteDraft for QuoteSubmission {
    fn required_value(&self, field: RequiredField) -> Option<&str> {
        match field {
            RequiredField::Name => self.name.as_deref(),
            RequiredField::Phone => self.phone.as_deref(),
            RequiredField::Email => self.email.as_deref(),
            RequiredField::Pickup => self.pickup.as_deref(),
            RequiredField::Dropoff => self.dropoff.as_deref(),
        }
    }
}

/// Passenger count: the form sends a number, older clients send text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Passengers {
    Count(serde_json::Number),
    Text(String),
}

/// Whole-valued floats below 1e21 print without a fraction (`3.0` as `3`)
impl std::fmt::Display for Passengers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Passengers::Count(n) if n.is_f64() => match n.as_f64() {
                Some(v) if v.fract() == 0.0 && v.abs() < 1e21 => write!(f, "{:.0}", v + 0.0),
                _ => write!(f, "{}", n),
            },
            Passengers::Count(n) => write!(f, "{}", n),
            Passengers::Text(s) => f.write_str(s),
        }
    }
}

/// Why a quote request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    InvalidJson,
    RateLimited,
    ValidationError,
    InvalidEmail,
    SpamDetected,
    SmtpNotConfigured,
    SmtpError,
}

impl ReasonCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::InvalidJson => "invalid_json",
            ReasonCode::RateLimited => "rate_limited",
            ReasonCode::ValidationError => "validation_error",
            ReasonCode::InvalidEmail => "invalid_email",
            ReasonCode::SpamDetected => "spam_detected",
            ReasonCode::SmtpNotConfigured => "smtp_not_configured",
            ReasonCode::SmtpError => "smtp_error",
        }
    }

    /// Fixed status class of each reason
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ReasonCode::InvalidJson
            | ReasonCode::ValidationError
            | ReasonCode::InvalidEmail
            | ReasonCode::SpamDetected => ErrorKind::BadRequest,
            ReasonCode::RateLimited => ErrorKind::TooManyRequests,
            ReasonCode::SmtpNotConfigured | ReasonCode::SmtpError => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub const fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response body: `{ "ok": true }` or `{ "ok": false, "error": "<code>" }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ReasonCode>,
}

impl QuoteResponse {
    pub fn accepted() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn rejected(reason: ReasonCode) -> Self {
        Self {
            ok: false,
            error: Some(reason),
        }
    }
}

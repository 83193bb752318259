//! Domain Entities
//!
//! Core business entities for the quote domain.

use kernel::QuoteSubmission;
use kernel::rules::{self, RequiredField, RuleViolation};

/// Contact details of a submission that passed the contact rules
///
/// All values are trimmed and non-empty; the email has a valid shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub pickup: String,
    pub dropoff: String,
}

impl ContactDetails {
    /// Validate the contact rules of a submission
    ///
    /// Missing fields are reported before a malformed email, so a request
    /// with both problems is a validation error.
    pub fn validate(submission: &QuoteSubmission) -> Result<Self, RuleViolation> {
        let violations = rules::contact_violations(submission);

        if let Some(missing) = violations
            .iter()
            .find(|v| matches!(v, RuleViolation::Missing(_)))
        {
            return Err(*missing);
        }
        if !violations.is_empty() {
            return Err(RuleViolation::InvalidEmail);
        }

        let value = |field| {
            rules::trimmed(submission, field)
                .unwrap_or_default()
                .to_string()
        };

        Ok(Self {
            name: value(RequiredField::Name),
            phone: value(RequiredField::Phone),
            email: value(RequiredField::Email),
            pickup: value(RequiredField::Pickup),
            dropoff: value(RequiredField::Dropoff),
        })
    }
}

/// True when the free-text message looks like link spam
pub fn is_spam(submission: &QuoteSubmission) -> bool {
    submission
        .message
        .as_deref()
        .is_some_and(rules::is_link_flood)
}

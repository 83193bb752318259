//! Quote Rules
//!
//! The single rule set for a quote request. The intake endpoint and the
//! form controller both evaluate it, so the two sides cannot drift.
//!
//! - Required contact fields must be non-empty after trimming
//! - The email must look like `local@domain.tld`
//! - The message must not carry a flood of links

use regex::Regex;
use std::sync::LazyLock;

/// Minimum number of `http` occurrences that marks a message as link spam
pub const LINK_FLOOD_THRESHOLD: usize = 3;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Fields that must be filled before a quote request is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Name,
    Phone,
    Email,
    Pickup,
    Dropoff,
}

impl RequiredField {
    /// All required fields, in form order
    pub const ALL: [RequiredField; 5] = [
        RequiredField::Name,
        RequiredField::Phone,
        RequiredField::Email,
        RequiredField::Pickup,
        RequiredField::Dropoff,
    ];

    /// Wire name of the field
    pub const fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Phone => "phone",
            RequiredField::Email => "email",
            RequiredField::Pickup => "pickup",
            RequiredField::Dropoff => "dropoff",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A broken contact rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    /// Field is absent or blank after trimming
    Missing(RequiredField),
    /// Email is present but not shaped like `local@domain.tld`
    InvalidEmail,
}

/// Anything that can hand out the raw values of the required fields
///
/// Implemented by the wire submission on the server and by the form state
/// on the client.
pub trait QuoteDraft {
    fn required_value(&self, field: RequiredField) -> Option<&str>;
}

/// Trimmed value of a required field, `None` when blank
pub fn trimmed<D: QuoteDraft + ?Sized>(draft: &D, field: RequiredField) -> Option<&str> {
    draft
        .required_value(field)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Check the contact rules and list every violation, in form order.
///
/// A missing email reports `Missing(Email)` only; the shape check runs on a
/// present email.
pub fn contact_violations<D: QuoteDraft + ?Sized>(draft: &D) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    for field in RequiredField::ALL {
        match trimmed(draft, field) {
            None => violations.push(RuleViolation::Missing(field)),
            Some(email) if field == RequiredField::Email && !is_valid_email(email) => {
                violations.push(RuleViolation::InvalidEmail);
            }
            Some(_) => {}
        }
    }

    violations
}

/// Basic `local@domain.tld` shape check
///
/// No whitespace and no extra `@` anywhere; the domain needs a dot with
/// something on both sides.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Crude link flood heuristic: 3 or more case-insensitive `http` occurrences
pub fn is_link_flood(message: &str) -> bool {
    message.to_lowercase().matches("http").count() >= LINK_FLOOD_THRESHOLD
}

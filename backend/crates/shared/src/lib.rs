//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the quote vocabulary, shared by
//! the intake endpoint and the form controller:
//! - Error classification mapped to HTTP status codes
//! - The quote wire model (submission, response, reason codes)
//! - The quote rule set (required fields, email shape, link flood heuristic)
//!
//! **Design Principle**: Only include things that must mean exactly the same
//! on both sides of the wire.

pub mod error {
    pub mod kind;
}
pub mod quote;
pub mod rules;

pub use error::kind::ErrorKind;
pub use quote::{Passengers, QuoteResponse, QuoteSubmission, ReasonCode};

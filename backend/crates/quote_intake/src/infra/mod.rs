//! Infrastructure Layer - External service implementations
//!
//! This layer contains:
//! - SMTP mailer implementation

pub mod smtp;

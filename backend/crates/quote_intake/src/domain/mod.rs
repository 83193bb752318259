//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (validated contact details, spam heuristic)
//! - The notification rendering of an accepted quote
//! - The mailer port (interface to the mail relay)

pub mod entities;
pub mod mailer;
pub mod notification;

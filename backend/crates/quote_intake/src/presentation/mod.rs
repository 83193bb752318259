//! Presentation Layer - HTTP handlers and routing
//!
//! This layer contains:
//! - HTTP handlers
//! - Router configuration

pub mod handlers;
pub mod router;

//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client address extraction from forwarding headers
//! - Rate limiting infrastructure (store trait + in-memory fixed window)
//! - Clock abstraction for time-dependent policies
//! - HTML escaping for untrusted values

pub mod client;
pub mod clock;
pub mod html;
pub mod rate_limit;

//! Quote Router

use crate::application::config::QuoteConfig;
use crate::domain::mailer::QuoteMailer;
use crate::infra::smtp::SmtpQuoteMailer;
use crate::presentation::handlers::{self, QuoteAppState};
use axum::{Router, routing::post};
use platform::clock::SystemClock;
use platform::rate_limit::{InMemoryRateLimiter, RateLimitStore};
use std::sync::Arc;

/// Create the quote router with the in-memory limiter and the SMTP mailer
pub fn quote_router(config: QuoteConfig) -> Router {
    let state = QuoteAppState {
        rate_limiter: Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone())),
        mailer: Arc::new(SmtpQuoteMailer::new(config.timeouts)),
        clock: Arc::new(SystemClock),
        config: Arc::new(config),
    };

    quote_router_generic(state)
}

/// Create a quote router for any limiter and mailer implementation
pub fn quote_router_generic<R, M>(state: QuoteAppState<R, M>) -> Router
where
    R: RateLimitStore + Send + Sync + 'static,
    M: QuoteMailer + Send + Sync + 'static,
{
    Router::new()
        .route("/quote", post(handlers::submit_quote::<R, M>))
        .with_state(state)
}

//! HTTP Handlers

use crate::application::config::QuoteConfig;
use crate::application::submit_quote::{SubmitQuoteOutcome, SubmitQuoteUseCase};
use crate::domain::mailer::QuoteMailer;
use crate::error::QuoteResult;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::HeaderMap;
use kernel::QuoteResponse;
use platform::client::extract_client_address;
use platform::clock::Clock;
use platform::rate_limit::RateLimitStore;
use std::sync::Arc;

/// Shared state for quote handlers
pub struct QuoteAppState<R, M>
where
    R: RateLimitStore + Send + Sync + 'static,
    M: QuoteMailer + Send + Sync + 'static,
{
    pub rate_limiter: Arc<R>,
    pub mailer: Arc<M>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<QuoteConfig>,
}

impl<R, M> Clone for QuoteAppState<R, M>
where
    R: RateLimitStore + Send + Sync + 'static,
    M: QuoteMailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            rate_limiter: Arc::clone(&self.rate_limiter),
            mailer: Arc::clone(&self.mailer),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
        }
    }
}

/// POST /api/quote
///
/// The body is taken raw so that any decoding failure is answered with
/// `invalid_json` instead of axum's own rejection. That includes bodies
/// axum refuses to buffer.
pub async fn submit_quote<R, M>(
    State(state): State<QuoteAppState<R, M>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> QuoteResult<Json<QuoteResponse>>
where
    R: RateLimitStore + Send + Sync + 'static,
    M: QuoteMailer + Send + Sync + 'static,
{
    let body = body?;
    let client = extract_client_address(&headers);

    let use_case = SubmitQuoteUseCase::new(
        state.rate_limiter.clone(),
        state.mailer.clone(),
        state.clock.clone(),
        state.config.clone(),
    );

    match use_case.execute(&body, &client).await? {
        SubmitQuoteOutcome::Delivered | SubmitQuoteOutcome::HoneypotDiscarded => {
            Ok(Json(QuoteResponse::accepted()))
        }
    }
}

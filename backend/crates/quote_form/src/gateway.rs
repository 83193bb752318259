//! Quote gateway
//!
//! The network leg between the form and `POST /api/quote`.

use kernel::{QuoteResponse, QuoteSubmission, ReasonCode};
use thiserror::Error;

/// Path of the intake endpoint, relative to the site origin
pub const QUOTE_PATH: &str = "/api/quote";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request never got an HTTP answer
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Quote rejected with status {status}")]
    Rejected {
        status: u16,
        reason: Option<ReasonCode>,
    },

    /// Success status but the body is not a quote response
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

/// Transport used by the form controller
#[trait_variant::make(QuoteGateway: Send)]
pub trait LocalQuoteGateway {
    async fn submit(&self, submission: &QuoteSubmission) -> Result<QuoteResponse, GatewayError>;
}

/// [`QuoteGateway`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpQuoteGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQuoteGateway {
    /// Gateway for the site at `base_url` (scheme and host, no trailing path)
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), QUOTE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QuoteGateway for HttpQuoteGateway {
    async fn submit(&self, submission: &QuoteSubmission) -> Result<QuoteResponse, GatewayError> {
        let response = self.client.post(self.endpoint.as_str()).json(submission).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let parsed = serde_json::from_slice::<QuoteResponse>(&body);

        if !status.is_success() {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                reason: parsed.ok().and_then(|r| r.error),
            });
        }

        parsed.map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

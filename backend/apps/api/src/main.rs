//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are
//! `quote_intake::QuoteError` and render their own responses.

use axum::{
    Router, http,
    http::{Method, header},
};
use quote_intake::{QuoteConfig, quote_router};
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,quote_intake=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Quote configuration; mail settings may be incomplete
    let quote_config = QuoteConfig::from_env();
    let missing = quote_config.mail.missing();
    if missing.is_empty() {
        tracing::info!(
            host = quote_config.mail.host.as_deref().unwrap_or_default(),
            port = quote_config.mail.port.unwrap_or_default(),
            "Mail relay configured"
        );
    } else {
        tracing::warn!(
            missing = ?missing,
            "Mail relay not configured, quote requests will fail with smtp_not_configured"
        );
    }

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());
    let cors = cors_layer(&frontend_origins);

    // Build router
    let app = Router::new()
        .nest("/api", quote_router(quote_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("QUOTE_API_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS for the site origins in a comma-separated list
fn cors_layer(origins: &str) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
}

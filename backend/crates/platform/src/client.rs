//! Client identification utilities
//!
//! Derives the client address from the forwarding headers set by the
//! reverse proxy in front of the API.

use axum::http::HeaderMap;

/// Placeholder used when no forwarding header identifies the client
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Source address of a request, as reported by the proxy
///
/// Kept as the raw header text: it is a rate limit key and a line in the
/// notification email, never parsed or routed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientAddress(String);

impl ClientAddress {
    /// Create from a header value; blank input becomes `unknown`
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        let trimmed = address.trim();
        if trimmed.is_empty() {
            Self::unknown()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_CLIENT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_CLIENT
    }
}

impl std::fmt::Display for ClientAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the client address from headers
///
/// Checks X-Forwarded-For first (first entry of the list), then X-Real-IP.
/// Falls back to `unknown` when neither identifies the client.
///
/// ## Arguments
/// * `headers` - HTTP request headers
pub fn extract_client_address(headers: &HeaderMap) -> ClientAddress {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
    };

    if let Some(xff) = header_text("x-forwarded-for") {
        // An empty first entry does not fall through to X-Real-IP
        let first = xff.split(',').next().unwrap_or_default();
        return ClientAddress::new(first);
    }

    match header_text("x-real-ip") {
        Some(real_ip) => ClientAddress::new(real_ip),
        None => ClientAddress::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_address_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static(" 192.168.1.1 , 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.9.9.9"));

        let addr = extract_client_address(&headers);
        assert_eq!(addr.as_str(), "192.168.1.1");
    }

    #[test]
    fn test_extract_client_address_empty_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" , 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.9.9.9"));

        assert!(extract_client_address(&headers).is_unknown());
    }

    #[test]
    fn test_extract_client_address_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(extract_client_address(&headers).as_str(), "203.0.113.7");
    }

    #[test]
    fn test_extract_client_address_empty_xff_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(extract_client_address(&headers).as_str(), "203.0.113.7");
    }

    #[test]
    fn test_extract_client_address_unknown() {
        let headers = HeaderMap::new();
        let addr = extract_client_address(&headers);
        assert!(addr.is_unknown());
        assert_eq!(addr.to_string(), "unknown");
    }
}

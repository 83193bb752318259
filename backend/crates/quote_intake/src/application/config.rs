//! Application Configuration
//!
//! Configuration for the quote intake application layer.

use platform::rate_limit::RateLimitConfig;

use crate::domain::mailer::{MailTimeouts, SmtpEndpoint};

pub const ENV_SMTP_HOST: &str = "SMTP_HOST";
pub const ENV_SMTP_PORT: &str = "SMTP_PORT";
pub const ENV_SMTP_USER: &str = "SMTP_USER";
pub const ENV_SMTP_PASS: &str = "SMTP_PASS";
pub const ENV_QUOTE_TO: &str = "QUOTE_TO";
pub const ENV_QUOTE_FROM: &str = "QUOTE_FROM";

/// Quote application configuration
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Per-client submission window and table eviction
    pub rate_limit: RateLimitConfig,
    /// Mail relay settings; may be incomplete
    pub mail: MailSettings,
    /// Display name on the From header
    pub sender_name: String,
    /// Subject of every notification
    pub subject: String,
    /// Bounds on one delivery attempt
    pub timeouts: MailTimeouts,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            mail: MailSettings::default(),
            sender_name: "Royal Taxi BCN".to_string(),
            subject: "New Quote Request — RoyalTaxiBCN".to_string(),
            timeouts: MailTimeouts::default(),
        }
    }
}

impl QuoteConfig {
    /// Defaults with the mail settings read from the process environment
    pub fn from_env() -> Self {
        Self {
            mail: MailSettings::from_env(),
            ..Default::default()
        }
    }
}

/// Mail relay settings as found in the environment
///
/// Every value is optional here. Completeness is checked per request by
/// [`MailSettings::resolve`] so a misconfigured deployment still answers.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MailSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Recipient of the notifications
    pub to: Option<String>,
    /// Sender address
    pub from: Option<String>,
}

impl std::fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("to", &self.to)
            .field("from", &self.from)
            .finish()
    }
}

/// Complete relay settings, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMail {
    pub endpoint: SmtpEndpoint,
    pub to: String,
    pub from: String,
}

impl MailSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    ///
    /// Empty values count as absent, and so does a port that is not a
    /// positive integer.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: value(ENV_SMTP_HOST),
            port: value(ENV_SMTP_PORT)
                .and_then(|p| p.trim().parse::<u16>().ok())
                .filter(|p| *p > 0),
            username: value(ENV_SMTP_USER),
            password: value(ENV_SMTP_PASS),
            to: value(ENV_QUOTE_TO),
            from: value(ENV_QUOTE_FROM),
        }
    }

    /// Names of the settings that are absent
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (ENV_SMTP_HOST, self.host.is_none()),
            (ENV_SMTP_PORT, self.port.is_none()),
            (ENV_SMTP_USER, self.username.is_none()),
            (ENV_SMTP_PASS, self.password.is_none()),
            (ENV_QUOTE_TO, self.to.is_none()),
            (ENV_QUOTE_FROM, self.from.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Complete settings, or the names of the absent ones
    pub fn resolve(&self) -> Result<ResolvedMail, Vec<&'static str>> {
        match (
            &self.host,
            self.port,
            &self.username,
            &self.password,
            &self.to,
            &self.from,
        ) {
            (Some(host), Some(port), Some(username), Some(password), Some(to), Some(from)) => {
                Ok(ResolvedMail {
                    endpoint: SmtpEndpoint {
                        host: host.clone(),
                        port,
                        username: username.clone(),
                        password: password.clone(),
                    },
                    to: to.clone(),
                    from: from.clone(),
                })
            }
            _ => Err(self.missing()),
        }
    }
}

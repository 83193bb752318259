//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions and a process-local implementation.
//!
//! ## Policy
//! - Fixed window per key: one timestamp per key, compared against
//!   `now - window`. Not sliding, not a token bucket.
//! - A rejected request does not move the stored timestamp.
//! - Eviction is lazy: once the table holds `eviction_threshold` entries,
//!   every check first drops entries older than `retention`. This bounds
//!   memory, it is not an LRU.
//! - State is per process. Several instances behind a balancer each keep
//!   their own table.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::time::Duration;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Minimum time between two accepted requests from one key
    pub window: Duration,
    /// Table size at which stale entries are evicted
    pub eviction_threshold: usize,
    /// Age after which an entry is stale
    pub retention: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(10, 200)
    }
}

impl RateLimitConfig {
    /// Retention defaults to twice the window
    pub fn new(window_secs: u64, eviction_threshold: usize) -> Self {
        let window = Duration::from_secs(window_secs);
        Self {
            window,
            eviction_threshold,
            retention: window * 2,
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }

    pub fn retention_ms(&self) -> i64 {
        self.retention.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Milliseconds until the key may submit again (0 when allowed)
    pub retry_after_ms: i64,
}

impl RateLimitDecision {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            retry_after_ms: 0,
        }
    }

    pub fn limited(retry_after_ms: i64) -> Self {
        Self {
            allowed: false,
            retry_after_ms,
        }
    }
}

/// Trait for rate limit storage backends
///
/// A backend that cannot reach its storage must fail open and allow.
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check the key against the window and, when allowed, record `now_ms`
    /// as its latest accepted request.
    async fn check_and_record(&self, key: &str, now_ms: i64) -> RateLimitDecision;
}

/// In-memory fixed window limiter
///
/// Check-then-write for one key runs under that key's shard lock, so two
/// concurrent requests from the same key cannot both be accepted inside a
/// window.
#[derive(Debug, Default)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    last_accepted: DashMap<String, i64>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            last_accepted: DashMap::new(),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.last_accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_accepted.is_empty()
    }

    /// Drop entries older than the retention period
    ///
    /// ## Returns
    /// Number of evicted entries
    pub fn evict_stale(&self, now_ms: i64) -> usize {
        let retention_ms = self.config.retention_ms();
        let before = self.last_accepted.len();
        self.last_accepted
            .retain(|_, last_ms| now_ms - *last_ms <= retention_ms);
        before.saturating_sub(self.last_accepted.len())
    }

    /// Synchronous core of [`RateLimitStore::check_and_record`]
    pub fn decide(&self, key: &str, now_ms: i64) -> RateLimitDecision {
        if self.last_accepted.len() >= self.config.eviction_threshold {
            let evicted = self.evict_stale(now_ms);
            tracing::debug!(
                evicted = evicted,
                remaining = self.last_accepted.len(),
                "Rate limit table pruned"
            );
        }

        let window_ms = self.config.window_ms();
        match self.last_accepted.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                let elapsed_ms = now_ms - *entry.get();
                if elapsed_ms < window_ms {
                    return RateLimitDecision::limited(window_ms - elapsed_ms);
                }
                entry.insert(now_ms);
                RateLimitDecision::allowed()
            }
            Entry::Vacant(entry) => {
                entry.insert(now_ms);
                RateLimitDecision::allowed()
            }
        }
    }
}

impl RateLimitStore for InMemoryRateLimiter {
    async fn check_and_record(&self, key: &str, now_ms: i64) -> RateLimitDecision {
        self.decide(key, now_ms)
    }
}

//! Per-client request quota over a rolling window.
//!
//! The ledger maps a client identifier to the timestamps of its recently accepted
//! requests. Entries outside the window are pruned when the key is read; keys are
//! never evicted, so the ledger lives exactly as long as its owner.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Identifier used when a request carries no origin headers.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Quota settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Accepted requests per window
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,

    /// Window length in seconds; also sent to rejected clients as the retry hint
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_max_requests() -> usize {
    5
}

fn default_window_secs() -> u64 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

/// Outcome of an accepted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Requests already in the window before this one
    pub prior_in_window: usize,
    /// Requests still available after this one
    pub remaining: usize,
}

/// Quota exhausted for a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimited {
    pub retry_after_secs: u64,
}

/// Rolling-window request ledger keyed by client identifier
#[derive(Debug, Default)]
pub struct RateLimiter {
    config: RateLimitConfig,
    ledger: Mutex<HashMap<String, Vec<i64>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            ledger: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Admit or reject a request from `client` at the current time.
    pub fn check(&self, client: &str) -> Result<Admission, RateLimited> {
        self.check_at(client, Utc::now())
    }

    /// Admit or reject a request from `client` at `now`.
    ///
    /// Rejections leave the ledger untouched; admissions store the pruned
    /// sequence plus `now`.
    pub fn check_at(&self, client: &str, now: DateTime<Utc>) -> Result<Admission, RateLimited> {
        let now_ms = now.timestamp_millis();
        let window_ms = self.window_ms();

        let mut ledger = self.ledger.lock();
        let recent: Vec<i64> = ledger
            .get(client)
            .map(|stamps| {
                stamps
                    .iter()
                    .copied()
                    .filter(|t| now_ms - t < window_ms)
                    .collect()
            })
            .unwrap_or_default();

        let prior_in_window = recent.len();
        if prior_in_window >= self.config.max_requests {
            warn!(client, requests = prior_in_window, "Rate limit exceeded");
            return Err(RateLimited {
                retry_after_secs: self.config.window_secs,
            });
        }

        let mut updated = recent;
        updated.push(now_ms);
        ledger.insert(client.to_string(), updated);
        debug!(client, prior_in_window, "Request admitted");

        Ok(Admission {
            prior_in_window,
            remaining: self
                .config
                .max_requests
                .saturating_sub(prior_in_window + 1),
        })
    }

    /// Timestamps currently stored for `client`, pruned or not.
    pub fn recorded(&self, client: &str) -> usize {
        self.ledger.lock().get(client).map_or(0, Vec::len)
    }

    /// Number of client keys ever admitted.
    pub fn tracked_clients(&self) -> usize {
        self.ledger.lock().len()
    }

    fn window_ms(&self) -> i64 {
        i64::try_from(self.config.window_secs.saturating_mul(1000)).unwrap_or(i64::MAX)
    }
}

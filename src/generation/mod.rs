//! Post generation pipeline: request decoding, per-item drafting with fallback,
//! and batch orchestration under the per-client quota.

pub mod fallback;
pub mod generator;
pub mod item;
pub mod orchestrator;
pub mod schedule;

pub use fallback::{canned_batch, fallback_item};
pub use generator::{ItemGenerator, SYSTEM_INSTRUCTION};
pub use item::{timestamp_now, GeneratedItem, GenerationRequest};
pub use orchestrator::{BatchOrchestrator, BatchOutcome, FallbackBatch, GeneratedBatch};
pub use schedule::{scheduled_slot, POSTING_DAYS, POSTING_TIMES};

use crate::rate_limit::RateLimitConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hard ceiling on items per batch
pub const MAX_BATCH_SIZE: usize = 10;

/// Smallest allowed pause between provider calls within one batch
pub const MIN_ITEM_DELAY_MS: u64 = 200;

/// Batch generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Items generated when a request omits `count`
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Requests above this are truncated, never rejected
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Pause between successive provider calls (milliseconds)
    #[serde(default = "default_item_delay_ms")]
    pub item_delay_ms: u64,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

fn default_count() -> usize {
    7
}

fn default_max_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_item_delay_ms() -> u64 {
    MIN_ITEM_DELAY_MS
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            max_batch_size: default_max_batch_size(),
            item_delay_ms: default_item_delay_ms(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_batch_size == 0 || self.max_batch_size > MAX_BATCH_SIZE {
            return Err(format!(
                "max_batch_size must be between 1 and {}",
                MAX_BATCH_SIZE
            ));
        }
        if self.item_delay_ms < MIN_ITEM_DELAY_MS {
            return Err(format!(
                "item_delay_ms must be at least {}",
                MIN_ITEM_DELAY_MS
            ));
        }
        if self.rate_limit.max_requests == 0 {
            return Err("rate_limit.max_requests must be at least 1".to_string());
        }
        if self.rate_limit.window_secs == 0 {
            return Err("rate_limit.window_secs must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay_ms)
    }
}

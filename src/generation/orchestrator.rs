//! Batch orchestration: quota, clamping, sequential drafting and response shaping.

use super::fallback::canned_batch;
use super::generator::ItemGenerator;
use super::item::{timestamp_now, GeneratedItem, GenerationRequest};
use super::GenerationConfig;
use crate::error::ApiError;
use crate::pillar::PillarSelector;
use crate::rate_limit::{Admission, RateLimited, RateLimiter};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Message attached to a canned batch.
pub const FALLBACK_ERROR: &str = "Fell back to templates due to generation error";

/// A batch drafted through the provider, possibly with per-item fallbacks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBatch {
    pub ideas: Vec<GeneratedItem>,
    pub generated: bool,
    pub ai_powered: bool,
    pub timestamp: String,
    pub total_generated: usize,
    pub ai_success_rate: f64,
    pub rate_limit_remaining: usize,
}

/// The canned batch served after a pipeline-level failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackBatch {
    pub ideas: Vec<GeneratedItem>,
    pub generated: bool,
    pub ai_powered: bool,
    pub error: String,
    pub timestamp: String,
}

impl FallbackBatch {
    pub fn new(count: Option<usize>) -> Self {
        Self {
            ideas: canned_batch(count),
            generated: false,
            ai_powered: false,
            error: FALLBACK_ERROR.to_string(),
            timestamp: timestamp_now(),
        }
    }
}

/// Result of one generation request
#[derive(Debug, Clone)]
pub enum BatchOutcome {
    Generated(GeneratedBatch),
    Fallback(FallbackBatch),
    RateLimited(RateLimited),
}

/// Share of model-drafted items; an empty batch reports 0.
pub fn success_rate(items: &[GeneratedItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let drafted = items.iter().filter(|item| item.is_ai_generated).count();
    drafted as f64 / items.len() as f64
}

/// Turns generation requests into batches. Owns the rate-limit ledger, so every
/// orchestrator instance enforces its own quota.
pub struct BatchOrchestrator {
    generator: ItemGenerator,
    limiter: Arc<RateLimiter>,
    config: GenerationConfig,
    item_delay: Duration,
}

impl BatchOrchestrator {
    pub fn new(generator: ItemGenerator, config: GenerationConfig) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
        Self::with_limiter(generator, limiter, config)
    }

    pub fn with_limiter(
        generator: ItemGenerator,
        limiter: Arc<RateLimiter>,
        config: GenerationConfig,
    ) -> Self {
        let item_delay = config.item_delay();
        Self {
            generator,
            limiter,
            config,
            item_delay,
        }
    }

    /// Override the pause between provider calls.
    pub fn with_item_delay(mut self, item_delay: Duration) -> Self {
        self.item_delay = item_delay;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Handle a raw request body from `client`.
    ///
    /// Quota is checked before the body is decoded, so malformed requests still
    /// consume it. Decoding failures yield the canned batch, trimmed to the
    /// request's count when one can still be read.
    pub async fn handle(&self, client: &str, body: &[u8]) -> BatchOutcome {
        let admission = match self.limiter.check(client) {
            Ok(admission) => admission,
            Err(limited) => return BatchOutcome::RateLimited(limited),
        };

        match GenerationRequest::from_json(body, self.config.default_count) {
            Ok(request) => {
                BatchOutcome::Generated(self.run_batch(client, &request, admission).await)
            }
            Err(e) => {
                let count = GenerationRequest::lenient_count(body);
                BatchOutcome::Fallback(self.fallback(client, count, &e))
            }
        }
    }

    /// Generate a batch for an already decoded request.
    pub async fn generate(
        &self,
        client: &str,
        request: &GenerationRequest,
    ) -> Result<GeneratedBatch, RateLimited> {
        let admission = self.limiter.check(client)?;
        Ok(self.run_batch(client, request, admission).await)
    }

    async fn run_batch(
        &self,
        client: &str,
        request: &GenerationRequest,
        admission: Admission,
    ) -> GeneratedBatch {
        let count = request.effective_count(self.config.max_batch_size);
        if request.requested_count > count {
            warn!(
                client,
                requested = request.requested_count,
                allowed = count,
                "Truncated oversized generation request"
            );
        }

        let selector = PillarSelector::new(request.focus_area.as_deref());
        let mut ideas = Vec::with_capacity(count);
        for position in 0..count {
            let pillar = selector.pillar_for(position);
            ideas.push(self.generator.generate(pillar, position).await);

            if position + 1 < count && !self.item_delay.is_zero() {
                sleep(self.item_delay).await;
            }
        }

        let ai_success_rate = success_rate(&ideas);
        info!(
            client,
            total = ideas.len(),
            success_rate = ai_success_rate,
            "Generated post batch"
        );

        GeneratedBatch {
            total_generated: ideas.len(),
            ideas,
            generated: true,
            ai_powered: true,
            timestamp: timestamp_now(),
            ai_success_rate,
            rate_limit_remaining: admission.remaining,
        }
    }

    fn fallback(&self, client: &str, count: Option<usize>, cause: &ApiError) -> FallbackBatch {
        error!(client, error = %cause, "Content generation failed, serving canned batch");
        FallbackBatch::new(count)
    }
}

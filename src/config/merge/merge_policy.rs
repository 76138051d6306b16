//! Merge rules: built-in defaults beneath every other source.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000_i64)?
        .set_default("provider.provider_type", "openai")?
        .set_default("provider.model", crate::provider::DEFAULT_MODEL)?
        .set_default("sheets.backend", "google")?
        .set_default("sheets.range", crate::sheets::DEFAULT_RANGE)?
        .set_default("generation.default_count", 7_i64)?
        .set_default("generation.max_batch_size", 10_i64)?
        .set_default("generation.item_delay_ms", 200_i64)?
        .set_default("generation.rate_limit.max_requests", 5_i64)?
        .set_default("generation.rate_limit.window_secs", 60_i64)
}

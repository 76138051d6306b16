//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ProviderNotConfigured(msg) => {
            format!("{}\nSet OPENAI_API_KEY or configure [provider] in config/config.toml", msg)
        }
        ApiError::StoreError(err) => format!(
            "{}\nCheck the GOOGLE_SHEETS_* variables or set sheets.backend = \"memory\"",
            err
        ),
        ApiError::RateLimited { retry_after_secs } => format!(
            "Generation quota used up for this client; try again in {} seconds",
            retry_after_secs
        ),
        other => other.to_string(),
    }
}

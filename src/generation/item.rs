//! Wire types of the generation endpoint.

use crate::error::ApiError;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One drafted post. Field names follow the dashboard's JSON contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedItem {
    pub post_description: String,
    pub instructions: String,
    pub pillar: String,
    pub cta: String,
    pub hashtags: String,
    pub scheduled_for: String,
    pub generated_at: String,
    #[serde(rename = "isAIGenerated")]
    pub is_ai_generated: bool,
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2025-03-01T09:30:00.000Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    #[serde(default)]
    count: Option<i64>,
    #[serde(default)]
    focus_area: Option<String>,
}

/// Decoded generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Count as sent by the client, before clamping
    pub requested_count: usize,
    /// Pillar name to pin the whole batch to
    pub focus_area: Option<String>,
}

impl GenerationRequest {
    pub fn new(requested_count: usize, focus_area: Option<String>) -> Self {
        Self {
            requested_count,
            focus_area: focus_area.filter(|area| !area.is_empty()),
        }
    }

    /// Decode a JSON body `{count?, focusArea?}`.
    ///
    /// A missing or null count means `default_count` and a negative count means 0.
    /// Anything that is not a JSON object with an integer count and a string focus
    /// area is rejected.
    pub fn from_json(body: &[u8], default_count: usize) -> Result<Self, ApiError> {
        let raw: RawRequest = serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Malformed request body: {}", e)))?;
        let requested_count = raw.count.map(non_negative).unwrap_or(default_count);
        Ok(Self::new(requested_count, raw.focus_area))
    }

    /// Best-effort read of `count` from a body that failed to decode, used to size
    /// the canned batch.
    pub fn lenient_count(body: &[u8]) -> Option<usize> {
        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        value.get("count")?.as_i64().map(non_negative)
    }

    /// Count actually generated
    pub fn effective_count(&self, max_batch_size: usize) -> usize {
        self.requested_count.min(max_batch_size)
    }
}

fn non_negative(count: i64) -> usize {
    usize::try_from(count.max(0)).unwrap_or(usize::MAX)
}

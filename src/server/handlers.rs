//! Request handlers for the generation and store endpoints.

use super::error::ServerError;
use super::AppState;
use crate::generation::{timestamp_now, BatchOutcome, GeneratedItem};
use crate::rate_limit::UNKNOWN_CLIENT;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

/// Message returned with every 429
pub const RATE_LIMIT_MESSAGE: &str =
    "Rate limit exceeded. Please wait a minute before generating more content.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RateLimitBody {
    error: &'static str,
    retry_after: u64,
}

#[derive(Debug, Deserialize)]
pub struct AppendRequest {
    pub content: Vec<GeneratedItem>,
}

#[derive(Debug, Serialize)]
pub struct AppendResponse {
    pub success: bool,
    pub added: usize,
}

/// Rate-limit key for a request: the whole `X-Forwarded-For` value, then
/// `X-Real-IP`, then `"unknown"`. The peer address is not consulted.
pub fn client_identifier(req: &HttpRequest) -> String {
    ["x-forwarded-for", "x-real-ip"]
        .iter()
        .filter_map(|name| req.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// `POST /api/generate-content`
pub async fn generate_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let client = client_identifier(&req);
    match state.orchestrator.handle(&client, &body).await {
        BatchOutcome::Generated(batch) => HttpResponse::Ok().json(batch),
        BatchOutcome::Fallback(batch) => HttpResponse::Ok().json(batch),
        BatchOutcome::RateLimited(limited) => HttpResponse::TooManyRequests().json(RateLimitBody {
            error: RATE_LIMIT_MESSAGE,
            retry_after: limited.retry_after_secs,
        }),
    }
}

/// `GET /api/sheets`
pub async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse, ServerError> {
    let summary = state.sheets.summary().await.map_err(|e| {
        let err = ServerError::FetchFailed(e);
        error!(error = %err.detail(), "Failed to read posts");
        err
    })?;
    Ok(HttpResponse::Ok().json(summary))
}

/// `POST /api/sheets`
pub async fn append_posts(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ServerError> {
    let request: AppendRequest = serde_json::from_slice(&body).map_err(|e| {
        let err = ServerError::InvalidBody(e.to_string());
        error!(error = %err.detail(), "Rejected post append body");
        err
    })?;

    let added = state.sheets.add_items(&request.content).await.map_err(|e| {
        let err = ServerError::AddFailed(e);
        error!(error = %err.detail(), "Failed to append posts");
        err
    })?;

    Ok(HttpResponse::Ok().json(AppendResponse {
        success: true,
        added,
    }))
}

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": timestamp_now(),
    }))
}

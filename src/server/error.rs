//! HTTP error mapping for the store endpoints.

use crate::error::StoreError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Reading the post store failed
    #[error("Failed to fetch data")]
    FetchFailed(#[source] StoreError),

    /// Appending to the post store failed
    #[error("Failed to add content")]
    AddFailed(#[source] StoreError),

    /// `POST /api/sheets` body was not `{content: [...]}`
    #[error("Failed to add content")]
    InvalidBody(String),
}

impl ServerError {
    /// Underlying cause, for logs only; clients see the generic message.
    pub fn detail(&self) -> String {
        match self {
            ServerError::FetchFailed(e) | ServerError::AddFailed(e) => e.to_string(),
            ServerError::InvalidBody(msg) => msg.clone(),
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

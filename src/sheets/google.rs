//! Google Sheets v4 backend authenticated with a service account.
//!
//! The service account signs a short-lived RS256 assertion which is exchanged for
//! an OAuth access token; the token is reused until shortly before it expires.

use super::TabularStore;
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use parking_lot::Mutex;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (the maximum Google accepts)
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before their reported expiry
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

const STORE_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const STORE_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Service account identity
#[derive(Clone)]
pub struct ServiceAccountKey {
    pub client_email: String,
    private_key_pem: String,
}

impl ServiceAccountKey {
    /// Keys copied from JSON credentials often carry escaped newlines; both forms work.
    pub fn new(client_email: String, private_key: &str) -> Self {
        Self {
            client_email,
            private_key_pem: private_key.replace("\\n", "\n"),
        }
    }

    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_pem", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    refresh_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Sheets API store
pub struct GoogleSheetsStore {
    client: Client,
    spreadsheet_id: String,
    range: String,
    key: ServiceAccountKey,
    token_url: String,
    api_base: String,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheetsStore {
    pub fn new(
        spreadsheet_id: String,
        range: String,
        key: ServiceAccountKey,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .connect_timeout(STORE_HTTP_CONNECT_TIMEOUT)
            .timeout(STORE_HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::RequestFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            spreadsheet_id,
            range,
            key,
            token_url: TOKEN_URL.to_string(),
            api_base: SHEETS_API_BASE.to_string(),
            token: Mutex::new(None),
        })
    }

    /// Point the store at different OAuth and Sheets endpoints.
    pub fn with_endpoints(mut self, token_url: String, api_base: String) -> Self {
        self.token_url = token_url;
        self.api_base = api_base;
        self
    }

    /// Signed assertion for the token exchange, issued at `now`.
    pub fn signed_assertion(&self, now: DateTime<Utc>) -> Result<String, StoreError> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_url,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key_pem().as_bytes())
            .map_err(|e| StoreError::AuthFailed(format!("Invalid service account key: {}", e)))?;
        encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| StoreError::AuthFailed(format!("Failed to sign assertion: {}", e)))
    }

    async fn access_token(&self) -> Result<String, StoreError> {
        let now = Utc::now();
        let cached = self.token.lock().clone();
        if let Some(cached) = cached {
            if cached.refresh_at > now {
                return Ok(cached.access_token);
            }
        }

        let assertion = self.signed_assertion(now)?;
        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::AuthFailed(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::AuthFailed(format!(
                "Token exchange rejected with status {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Malformed token response: {}", e)))?;

        let refresh_at =
            now + ChronoDuration::seconds(token.expires_in - TOKEN_REFRESH_MARGIN_SECS);
        *self.token.lock() = Some(CachedToken {
            access_token: token.access_token.clone(),
            refresh_at,
        });
        debug!(client_email = %self.key.client_email, "Obtained spreadsheet access token");
        Ok(token.access_token)
    }

    /// `{api_base}/spreadsheets/{id}/values/{range}{suffix}`
    pub fn values_url(&self, suffix: &str) -> Result<Url, StoreError> {
        let range_segment = format!("{}{}", self.range, suffix);
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| StoreError::NotConfigured(format!("Invalid Sheets API base: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::NotConfigured("Sheets API base cannot be a base".to_string()))?
            .pop_if_empty()
            .extend([
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                range_segment.as_str(),
            ]);
        Ok(url)
    }
}

fn map_status(status: StatusCode, body: String) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StoreError::AuthFailed(format!("Sheets API denied access ({}): {}", status, body))
        }
        _ => StoreError::RequestFailed(format!("Sheets API returned {}: {}", status, body)),
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl TabularStore for GoogleSheetsStore {
    async fn read_rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
        let token = self.access_token().await?;
        let url = self.values_url("")?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(format!("Sheets read failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, body));
        }

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Malformed value range: {}", e)))?;

        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        let token = self.access_token().await?;
        let mut url = self.values_url(":append")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(format!("Sheets append failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, body));
        }
        Ok(())
    }
}

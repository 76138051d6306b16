//! Spreadsheet-backed post store
//!
//! Posts live in a nine-column sheet whose first row is a header. The store
//! backends move raw cell rows; `SheetsService` applies the column layout and
//! the read/write rules on top of any backend.

pub mod google;
pub mod memory;

pub use google::{GoogleSheetsStore, ServiceAccountKey};
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::generation::GeneratedItem;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Column titles written by `MemoryStore` and expected in row 1 of the sheet.
pub const HEADER: [&str; 9] = [
    "Post Description",
    "Instructions",
    "Status",
    "Image",
    "Scheduled For",
    "CTA",
    "Pillar",
    "Hashtags",
    "Created Date",
];

/// Status assigned to every appended post
pub const STATUS_PENDING: &str = "Pending";
/// Status counted as scheduled in the summary
pub const STATUS_SCHEDULED: &str = "Scheduled";
/// Status reported for rows with an empty status cell
pub const STATUS_DRAFT: &str = "draft";

pub const DEFAULT_RANGE: &str = "Sheet1!A1:I100";

/// Raw cell storage
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// All rows of the configured range, header included
    async fn read_rows(&self) -> Result<Vec<Vec<String>>, StoreError>;

    /// Append rows after the last non-empty row
    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<(), StoreError>;
}

/// One post as stored in the sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    pub post_description: String,
    pub instructions: String,
    pub status: String,
    pub image: String,
    pub scheduled_for: String,
    pub cta: String,
    pub pillar: String,
    pub hashtags: String,
    pub created_date: String,
}

impl SheetRow {
    /// Read a row of cells; `None` when the post description is empty.
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        let cell = |index: usize| cells.get(index).cloned().unwrap_or_default();
        let post_description = cell(0);
        if post_description.is_empty() {
            return None;
        }
        let status = match cell(2) {
            status if status.is_empty() => STATUS_DRAFT.to_string(),
            status => status,
        };
        Some(Self {
            post_description,
            instructions: cell(1),
            status,
            image: cell(3),
            scheduled_for: cell(4),
            cta: cell(5),
            pillar: cell(6),
            hashtags: cell(7),
            created_date: cell(8),
        })
    }

    /// Row written for a generated post: pending, no image, created today (UTC).
    pub fn from_item(item: &GeneratedItem) -> Self {
        Self {
            post_description: item.post_description.clone(),
            instructions: item.instructions.clone(),
            status: STATUS_PENDING.to_string(),
            image: String::new(),
            scheduled_for: item.scheduled_for.clone(),
            cta: item.cta.clone(),
            pillar: item.pillar.clone(),
            hashtags: item.hashtags.clone(),
            created_date: Utc::now().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn into_cells(self) -> Vec<String> {
        vec![
            self.post_description,
            self.instructions,
            self.status,
            self.image,
            self.scheduled_for,
            self.cta,
            self.pillar,
            self.hashtags,
            self.created_date,
        ]
    }
}

/// Posts plus dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSummary {
    pub posts: Vec<SheetRow>,
    pub total_posts: usize,
    pub pending_posts: usize,
    pub scheduled_posts: usize,
}

impl SheetSummary {
    pub fn from_posts(posts: Vec<SheetRow>) -> Self {
        let count = |status: &str| posts.iter().filter(|p| p.status == status).count();
        Self {
            total_posts: posts.len(),
            pending_posts: count(STATUS_PENDING),
            scheduled_posts: count(STATUS_SCHEDULED),
            posts,
        }
    }
}

/// Post-level operations over a cell store
#[derive(Clone)]
pub struct SheetsService {
    store: Arc<dyn TabularStore>,
}

impl SheetsService {
    pub fn new(store: Arc<dyn TabularStore>) -> Self {
        Self { store }
    }

    /// Read every post below the header row.
    pub async fn summary(&self) -> Result<SheetSummary, StoreError> {
        let rows = self.store.read_rows().await?;
        let posts: Vec<SheetRow> = rows
            .iter()
            .skip(1)
            .filter_map(|cells| SheetRow::from_cells(cells))
            .collect();
        debug!(rows = rows.len(), posts = posts.len(), "Read posts from sheet");
        Ok(SheetSummary::from_posts(posts))
    }

    /// Append generated posts as pending rows; returns the number added.
    pub async fn add_items(&self, items: &[GeneratedItem]) -> Result<usize, StoreError> {
        if items.is_empty() {
            return Ok(0);
        }
        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|item| SheetRow::from_item(item).into_cells())
            .collect();
        let added = rows.len();
        self.store.append_rows(rows).await?;
        info!(added, "Appended posts to sheet");
        Ok(added)
    }
}

/// Which store backs the `/api/sheets` endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Google,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(StoreBackend::Google),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("Unknown store backend: {} (expected google or memory)", other)),
        }
    }
}

/// `[sheets]` configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// `GOOGLE_SHEETS_SPREADSHEET_ID`
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    /// `GOOGLE_SHEETS_CLIENT_EMAIL`
    #[serde(default)]
    pub client_email: Option<String>,

    /// `GOOGLE_SHEETS_PRIVATE_KEY`, PEM; literal `\n` sequences are accepted
    #[serde(default)]
    pub private_key: Option<String>,

    #[serde(default = "default_range")]
    pub range: String,
}

fn default_range() -> String {
    DEFAULT_RANGE.to_string()
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            spreadsheet_id: None,
            client_email: None,
            private_key: None,
            range: default_range(),
        }
    }
}

impl SheetsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.range.trim().is_empty() {
            return Err("Sheet range cannot be empty".to_string());
        }
        Ok(())
    }

    /// Build the configured backend. Google credentials are only required here,
    /// so a server without them still generates posts.
    pub fn build_store(&self) -> Result<Arc<dyn TabularStore>, StoreError> {
        match self.backend {
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::Google => {
                let require = |value: &Option<String>, name: &str| {
                    value
                        .clone()
                        .filter(|v| !v.trim().is_empty())
                        .ok_or_else(|| StoreError::NotConfigured(format!("{} is not set", name)))
                };
                let key = ServiceAccountKey::new(
                    require(&self.client_email, "GOOGLE_SHEETS_CLIENT_EMAIL")?,
                    &require(&self.private_key, "GOOGLE_SHEETS_PRIVATE_KEY")?,
                );
                let store = GoogleSheetsStore::new(
                    require(&self.spreadsheet_id, "GOOGLE_SHEETS_SPREADSHEET_ID")?,
                    self.range.clone(),
                    key,
                )?;
                Ok(Arc::new(store))
            }
        }
    }
}

/// Store used when the configured backend cannot be built; every call fails
/// with the construction error, which the HTTP layer reports as a 500.
pub struct UnavailableStore {
    error: StoreError,
}

impl UnavailableStore {
    pub fn new(error: StoreError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl TabularStore for UnavailableStore {
    async fn read_rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
        Err(self.error.clone())
    }

    async fn append_rows(&self, _rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        Err(self.error.clone())
    }
}

//! In-process store for local runs and tests.

use super::{TabularStore, HEADER};
use crate::error::StoreError;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Rows held in memory, header first
#[derive(Debug)]
pub struct MemoryStore {
    rows: RwLock<Vec<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_rows(vec![HEADER.iter().map(|h| h.to_string()).collect()])
    }

    /// Start from raw rows; the first row is treated as the header.
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabularStore for MemoryStore {
    async fn read_rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
        Ok(self.rows.read().clone())
    }

    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        self.rows.write().extend(rows);
        Ok(())
    }
}

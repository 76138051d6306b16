//! Shared test utilities for integration tests
//!
//! Scripted provider outcomes, a store that always fails, and application
//! state wired without inter-item delays.

use async_trait::async_trait;
use postcraft::error::{ApiError, StoreError};
use postcraft::generation::{BatchOrchestrator, GenerationConfig, ItemGenerator};
use postcraft::provider::{
    ChatMessage, CompletionOptions, CompletionResponse, ModelProviderClient, TokenUsage,
};
use postcraft::server::AppState;
use postcraft::sheets::{MemoryStore, SheetsService, TabularStore};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Replays scripted outcomes, then succeeds with numbered drafts.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always_ok() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProviderClient for ScriptedProvider {
    async fn complete(
        &self,
        _messages: Vec<ChatMessage>,
        _options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let next = self.script.lock().unwrap().pop_front();
        match next.unwrap_or_else(|| Ok(format!("  Drafted post {}  \n", call))) {
            Ok(content) => Ok(CompletionResponse {
                content,
                model: "scripted".to_string(),
                usage: TokenUsage::default(),
                finish_reason: Some("stop".to_string()),
            }),
            Err(msg) => Err(ApiError::ProviderRequestFailed(msg)),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Store whose every call fails
pub struct FailingStore;

#[async_trait]
impl TabularStore for FailingStore {
    async fn read_rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
        Err(StoreError::RequestFailed("sheet offline".to_string()))
    }

    async fn append_rows(&self, _rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        Err(StoreError::RequestFailed("sheet offline".to_string()))
    }
}

pub fn orchestrator(provider: Arc<dyn ModelProviderClient>) -> Arc<BatchOrchestrator> {
    Arc::new(
        BatchOrchestrator::new(ItemGenerator::new(provider), GenerationConfig::default())
            .with_item_delay(Duration::ZERO),
    )
}

pub fn app_state(
    provider: Arc<dyn ModelProviderClient>,
    store: Arc<dyn TabularStore>,
) -> AppState {
    AppState::new(orchestrator(provider), SheetsService::new(store))
}

pub fn memory_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = app_state(Arc::new(ScriptedProvider::always_ok()), store.clone());
    (state, store)
}

/// Serializes tests that read or write process environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Sets variables for the lifetime of the guard and restores them afterwards,
/// holding the environment lock throughout.
pub struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn set(vars: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut saved = Vec::new();
        for (name, value) in vars {
            saved.push((name.to_string(), std::env::var(name).ok()));
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
        Self { saved, _lock: lock }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Isolate config loading from the host: empty XDG config home and no credentials.
pub fn isolated_env(xdg_config_home: &std::path::Path) -> EnvGuard {
    let xdg = xdg_config_home.to_string_lossy().to_string();
    EnvGuard::set(&[
        ("XDG_CONFIG_HOME", Some(xdg.as_str())),
        ("POSTCRAFT_ENV", None),
        ("OPENAI_API_KEY", None),
        ("GOOGLE_SHEETS_SPREADSHEET_ID", None),
        ("GOOGLE_SHEETS_CLIENT_EMAIL", None),
        ("GOOGLE_SHEETS_PRIVATE_KEY", None),
    ])
}

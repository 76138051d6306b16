//! Configuration System
//!
//! Layered configuration on the `config` crate: built-in defaults, the global
//! file, workspace files, and environment variables, in increasing precedence.
//! An explicit `--config` file replaces the global and workspace files.

use crate::error::ApiError;
use crate::generation::GenerationConfig;
use crate::logging::LoggingConfig;
use crate::sheets::SheetsConfig;
use serde::{Deserialize, Serialize};

pub use crate::provider::{ProviderConfig, ProviderType};

mod loader;

mod merge {
    pub mod merge_policy;
}

mod sources {
    pub mod environment;
    pub mod global_file;
    pub mod workspace_file;
}

pub use loader::ConfigLoader;
pub use sources::environment::{ENV_PREFIX, WELL_KNOWN};
pub use sources::workspace_file::ENV_SELECTOR;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Text-generation provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Post store
    #[serde(default)]
    pub sheets: SheetsConfig,

    /// Batch sizes, pacing and quota
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Worker threads; actix picks one per core when unset
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host cannot be empty".to_string());
        }
        if self.workers == Some(0) {
            return Err("workers must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Server(String),
    Provider(String),
    Sheets(String),
    Generation(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Server(msg) => write!(f, "Server: {}", msg),
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Sheets(msg) => write!(f, "Sheets: {}", msg),
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl AppConfig {
    /// Validate the entire configuration.
    ///
    /// Credentials are not checked here: a missing OpenAI key degrades to
    /// fallback posts and missing sheet credentials surface when the store is built.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.server.validate() {
            errors.push(ValidationError::Server(e));
        }
        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.sheets.validate() {
            errors.push(ValidationError::Sheets(e));
        }
        if let Err(e) = self.generation.validate() {
            errors.push(ValidationError::Generation(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// `validate` folded into a single `ApiError::ConfigError`.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }
}

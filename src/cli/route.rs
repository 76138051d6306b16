//! CLI route: single route table and run context.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_batch_text, format_pillars_text, format_posts_text, to_json,
};
use crate::config::{AppConfig, ConfigLoader};
use crate::error::ApiError;
use crate::generation::GenerationRequest;
use crate::server::{run_server, AppState};
use std::future::Future;
use std::path::PathBuf;
use tracing::info;

/// Rate-limit key used for batches generated from the command line
pub const CLI_CLIENT: &str = "cli";

/// Runtime context for CLI execution: loaded configuration plus workspace.
pub struct RunContext {
    config: AppConfig,
    workspace_root: PathBuf,
}

impl RunContext {
    /// Load and validate configuration for `workspace_root`, or from `config_path` when given.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        config.ensure_valid()?;
        Ok(Self::from_config(workspace_root, config))
    }

    pub fn from_config(workspace_root: PathBuf, config: AppConfig) -> Self {
        Self {
            config,
            workspace_root,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    /// Run one command and return what should be printed.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(command = command.name(), "Executing command");
        match command {
            Commands::Serve { host, port, store } => {
                let mut config = self.config.clone();
                if let Some(host) = host {
                    config.server.host = host.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
                if let Some(store) = store {
                    config.sheets.backend = *store;
                }
                config.ensure_valid()?;
                actix_web::rt::System::new().block_on(run_server(config))?;
                Ok("Server stopped".to_string())
            }
            Commands::Generate {
                count,
                focus,
                format,
                save,
                yes,
            } => self.block_on(self.handle_generate(*count, focus.clone(), format, *save, *yes)),
            Commands::Posts { format } => self.block_on(self.handle_posts(format)),
            Commands::Pillars => Ok(format_pillars_text()),
        }
    }

    fn block_on<F>(&self, future: F) -> Result<String, ApiError>
    where
        F: Future<Output = Result<String, ApiError>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start async runtime: {}", e)))?;
        runtime.block_on(future)
    }

    async fn handle_generate(
        &self,
        count: Option<usize>,
        focus: Option<String>,
        format: &str,
        save: bool,
        yes: bool,
    ) -> Result<String, ApiError> {
        let state = AppState::from_config(&self.config);
        let request = GenerationRequest::new(
            count.unwrap_or(self.config.generation.default_count),
            focus,
        );
        let batch = state
            .orchestrator
            .generate(CLI_CLIENT, &request)
            .await?;

        let rendered = match format {
            "json" => to_json(&batch)?,
            _ => format_batch_text(&batch),
        };
        if !save {
            return Ok(rendered);
        }

        println!("{}", rendered);
        if !yes {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!("Save {} posts to the post store?", batch.ideas.len()))
                .interact()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;
            if !confirmed {
                return Ok("Save cancelled".to_string());
            }
        }

        let added = state.sheets.add_items(&batch.ideas).await?;
        Ok(format!("Saved {} posts", added))
    }

    async fn handle_posts(&self, format: &str) -> Result<String, ApiError> {
        let state = AppState::from_config(&self.config);
        let summary = state.sheets.summary().await?;
        match format {
            "json" => to_json(&summary),
            _ => Ok(format_posts_text(&summary)),
        }
    }
}

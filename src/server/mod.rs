//! HTTP Server
//!
//! actix-web application exposing batch generation and the post store.
//! The rate-limit ledger lives inside the orchestrator held by `AppState`,
//! so it is shared by every worker of one server.

mod error;
pub mod handlers;

pub use error::ServerError;
pub use handlers::{client_identifier, AppendRequest, AppendResponse, RATE_LIMIT_MESSAGE};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::generation::{BatchOrchestrator, ItemGenerator};
use crate::provider::{ModelProviderClient, ProviderFactory, UnconfiguredProvider};
use crate::sheets::{SheetsService, TabularStore, UnavailableStore};
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<BatchOrchestrator>,
    pub sheets: SheetsService,
}

impl AppState {
    pub fn new(orchestrator: Arc<BatchOrchestrator>, sheets: SheetsService) -> Self {
        Self {
            orchestrator,
            sheets,
        }
    }

    /// Wire provider, orchestrator and store from configuration.
    ///
    /// Missing credentials do not stop the server: without a provider every
    /// item falls back to its template, and without a store the sheet
    /// endpoints answer 500.
    pub fn from_config(config: &AppConfig) -> Self {
        let provider = build_provider(config);
        let generator = ItemGenerator::new(provider);
        let orchestrator = Arc::new(BatchOrchestrator::new(
            generator,
            config.generation.clone(),
        ));

        let store: Arc<dyn TabularStore> = match config.sheets.build_store() {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "Post store unavailable");
                Arc::new(UnavailableStore::new(e))
            }
        };

        Self::new(orchestrator, SheetsService::new(store))
    }
}

/// Provider client for the configured backend, or a stand-in that always fails.
pub fn build_provider(config: &AppConfig) -> Arc<dyn ModelProviderClient> {
    let client = config
        .provider
        .to_model_provider()
        .and_then(|provider| ProviderFactory::create_client(&provider));
    match client {
        Ok(client) => {
            let client: Arc<dyn ModelProviderClient> = Arc::from(client);
            info!(
                provider = client.provider_name(),
                model = client.model_name(),
                "Model provider ready"
            );
            client
        }
        Err(e) => {
            warn!(error = %e, "Model provider unavailable, posts will use fallback templates");
            Arc::new(UnconfiguredProvider::new(e.to_string()))
        }
    }
}

/// Register the routes on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/generate-content",
        web::post().to(handlers::generate_content),
    )
    .service(
        web::resource("/api/sheets")
            .route(web::get().to(handlers::list_posts))
            .route(web::post().to(handlers::append_posts)),
    )
    .route("/health", web::get().to(handlers::health));
}

/// Bind and serve until shutdown.
pub async fn run_server(config: AppConfig) -> Result<(), ApiError> {
    let state = web::Data::new(AppState::from_config(&config));
    let (host, port) = config.server.bind_address();

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(configure)
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    let server = server
        .bind((host.as_str(), port))
        .map_err(|e| ApiError::ConfigError(format!("Failed to bind {}:{}: {}", host, port, e)))?;

    info!(host = %host, port, "Server listening");
    server
        .run()
        .await
        .map_err(|e| ApiError::ConfigError(format!("Server error: {}", e)))
}

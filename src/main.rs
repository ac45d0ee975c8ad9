//! AI PM Forge server entry point.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ai_pm_forge::adapters::ai::{GeminiConfig, GeminiProvider};
use ai_pm_forge::adapters::http::{router, AppState};
use ai_pm_forge::adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
use ai_pm_forge::application::{CredentialManager, ProgressStore};
use ai_pm_forge::config::{AppConfig, StorageBackend};
use ai_pm_forge::domain::catalog::ContentCatalog;
use ai_pm_forge::ports::KeyValueStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config);

    let catalog = Arc::new(load_catalog(&config)?);
    tracing::info!(
        weeks = catalog.weeks.len(),
        skills = catalog.leaf_skill_ids().len(),
        "catalog loaded"
    );

    let storage: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileKeyValueStore::new(&config.storage.data_dir)),
        StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
    };

    let progress = Arc::new(ProgressStore::load(catalog, Arc::clone(&storage)).await?);
    progress.schedule_setup_prompt(config.content.setup_prompt_delay());

    let credentials = Arc::new(
        CredentialManager::load(Arc::clone(&storage), config.ai.gemini_api_key.clone()).await?,
    );
    if !credentials.status().configured {
        tracing::warn!("no API key configured; the mentor will ask for one");
    }

    let model = GeminiProvider::new(
        GeminiConfig::new()
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    )?;

    let state = AppState::new(progress, credentials, Arc::new(model));
    let app = router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

fn load_catalog(config: &AppConfig) -> Result<ContentCatalog, Box<dyn Error + Send + Sync>> {
    match &config.content.catalog_path {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)?;
            Ok(ContentCatalog::from_yaml_str(&yaml)?)
        }
        None => Ok(ContentCatalog::builtin()?),
    }
}

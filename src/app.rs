use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::services::active_theme_cache::ActiveThemeCache;
use crate::application::services::theme_service::ThemeService;
use crate::domain::errors::DomainError;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::file_system::DataDirectory;
use crate::infrastructure::session::SessionSigner;

mod bootstrap;

pub const DATA_DIR_ENV: &str = "PORTFOLIO_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data";

pub struct AppState {
    pub data_directory: DataDirectory,
    pub config: AppConfig,
    pub theme_service: Arc<ThemeService>,
    pub active_theme_cache: Arc<ActiveThemeCache>,
    pub session_signer: SessionSigner,
}

impl AppState {
    /// Prepare the data root, load `config.json` and wire the services.
    /// Seeding is left to the caller.
    pub async fn new(data_root: &Path) -> Result<Self, DomainError> {
        tracing::info!("Initializing application with data root: {:?}", data_root);

        let data_directory = bootstrap::initialize_data_directory(data_root).await?;
        let config = AppConfig::load(data_directory.config_file()).await?;
        let state = Self::with_config(data_directory, config);

        tracing::info!("Application initialized successfully");
        Ok(state)
    }

    /// Wire the services over an already initialized data directory
    pub fn with_config(data_directory: DataDirectory, config: AppConfig) -> Self {
        let services = bootstrap::build_services(&data_directory, &config);
        let session_signer = SessionSigner::new(&config.security.session_secret);

        Self {
            data_directory,
            config,
            theme_service: services.theme_service,
            active_theme_cache: services.active_theme_cache,
            session_signer,
        }
    }
}

/// Data root from `PORTFOLIO_DATA_DIR`, falling back to `./data`
pub fn resolve_data_root() -> PathBuf {
    let data_root = std::env::var(DATA_DIR_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    tracing::debug!("Resolved data root: {:?}", data_root);
    data_root
}

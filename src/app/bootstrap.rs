use std::path::Path;
use std::sync::Arc;

use crate::application::services::active_theme_cache::ActiveThemeCache;
use crate::application::services::theme_service::ThemeService;
use crate::domain::errors::DomainError;
use crate::domain::repositories::theme_repository::ThemeRepository;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::file_system::DataDirectory;
use crate::infrastructure::repositories::file_theme_repository::FileThemeRepository;

pub(super) struct AppServices {
    pub theme_service: Arc<ThemeService>,
    pub active_theme_cache: Arc<ActiveThemeCache>,
}

pub(super) async fn initialize_data_directory(
    data_root: &Path,
) -> Result<DataDirectory, DomainError> {
    let data_directory = DataDirectory::new(data_root.to_path_buf());
    data_directory.initialize().await?;
    Ok(data_directory)
}

pub(super) fn build_services(data_directory: &DataDirectory, config: &AppConfig) -> AppServices {
    let theme_repository: Arc<dyn ThemeRepository> = Arc::new(FileThemeRepository::new(
        data_directory.themes_file().to_path_buf(),
    ));

    let theme_service = Arc::new(ThemeService::new(theme_repository));
    let active_theme_cache = Arc::new(ActiveThemeCache::new(
        theme_service.clone(),
        config.cache.active_theme_ttl(),
    ));

    AppServices {
        theme_service,
        active_theme_cache,
    }
}

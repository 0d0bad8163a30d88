use std::sync::Arc;

pub mod app;
pub mod application;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

use app::{resolve_data_root, AppState};
use client::http_theme_source::HttpThemeSource;
use client::theme_applier::{apply_theme, CssVariables};
use client::theme_loader::{LoaderState, RetryPolicy, ThemeLoader, ThemeSlot};
use infrastructure::config::ClientConfig;
use infrastructure::logging::logger;
use infrastructure::persistence::file_system::DataDirectory;
use presentation::server::{run_server, shutdown_signal};

fn init_logging() -> DataDirectory {
    let data_directory = DataDirectory::new(resolve_data_root());
    if let Err(error) = logger::init_logger(data_directory.logs()) {
        eprintln!("Failed to initialize logger: {}", error);
    }
    data_directory
}

/// Start the portfolio server and block until Ctrl-C
pub async fn run() -> Result<(), String> {
    let data_directory = init_logging();

    tracing::info!("Starting portfolio server");

    let app_state = AppState::new(data_directory.root())
        .await
        .map_err(|e| format!("Failed to initialize application: {}", e))?;

    let seeded = app_state
        .theme_service
        .seed_default_themes()
        .await
        .map_err(|e| format!("Failed to seed default themes: {}", e))?;
    if !seeded.is_empty() {
        logger::info(&format!(
            "Created {} default themes, active theme: {}",
            seeded.len(),
            seeded[0].name
        ));
    }

    run_server(Arc::new(app_state), shutdown_signal()).await
}

/// Fetch the active theme from a running server the way a browser session
/// would, and return it rendered as CSS custom properties.
pub async fn preview(base_url: &str) -> Result<String, String> {
    init_logging();

    let source = HttpThemeSource::new(base_url).map_err(|e| e.to_string())?;
    tracing::info!("Loading active theme from {}", source.endpoint());

    let loader = Arc::new(ThemeLoader::new(
        Arc::new(source),
        RetryPolicy::from(&ClientConfig::default()),
        ThemeSlot::new(),
    ));
    let report = loader
        .clone()
        .mount()
        .finished()
        .await
        .map_err(|e| format!("Theme loader task failed: {}", e))?;

    if report.state != LoaderState::Succeeded {
        logger::warn(&format!(
            "No theme loaded after {} attempt(s), rendering defaults",
            report.attempts
        ));
    }

    let mut css = CssVariables::new();
    apply_theme(loader.slot().get().await.as_ref(), &mut css);
    Ok(css.to_root_rule())
}

use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app::AppState;

pub mod theme_routes;

#[cfg(test)]
mod tests;

/// Build the HTTP router over the shared application state
pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(theme_routes::health))
        .route(
            "/themes",
            get(theme_routes::list_themes).post(theme_routes::create_theme),
        )
        .route("/themes/active", get(theme_routes::get_active_theme))
        .route("/themes/active.css", get(theme_routes::get_active_theme_css))
        .route("/themes/:id/activate", put(theme_routes::activate_theme))
        .route(
            "/themes/:id/activate-public",
            put(theme_routes::activate_theme_public),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

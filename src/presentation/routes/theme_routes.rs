use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;

use crate::app::AppState;
use crate::application::dto::api_response::ApiResponse;
use crate::application::dto::theme_dto::{CreateThemeDto, ThemeDto};
use crate::client::theme_applier::{apply_theme, CssVariables};
use crate::infrastructure::logging::logger;
use crate::presentation::auth::AdminSession;
use crate::presentation::errors::ApiError;

/// Active theme responses must never be cached by browsers or proxies
pub const NO_STORE: &str = "no-cache, no-store, must-revalidate";

/// List every theme
pub async fn list_themes(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ThemeDto>>>, ApiError> {
    logger::debug("Route: list_themes");

    let themes = app_state.theme_service.list_themes().await?;
    Ok(Json(ApiResponse::ok(
        themes.into_iter().map(ThemeDto::from).collect(),
    )))
}

/// Create a new, inactive theme
pub async fn create_theme(
    State(app_state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    payload: Result<Json<CreateThemeDto>, JsonRejection>,
) -> Result<Json<ApiResponse<ThemeDto>>, ApiError> {
    let Json(dto) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let (name, variables) = dto.into_parts()?;
    logger::debug(&format!("Route: create_theme, name: {}, by: {}", name, session.sub));

    let theme = app_state.theme_service.create_theme(&name, variables).await?;
    Ok(Json(ApiResponse::ok(theme.into())))
}

/// Make a theme the only active one
pub async fn activate_theme(
    State(app_state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ThemeDto>>, ApiError> {
    logger::debug(&format!("Route: activate_theme, id: {}, by: {}", id, session.sub));

    activate(&app_state, &id).await
}

/// Unauthenticated activation, kept for existing clients and gated by config
pub async fn activate_theme_public(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ThemeDto>>, ApiError> {
    if !app_state.config.security.allow_public_activation {
        return Err(ApiError::Forbidden(
            "Public theme activation is disabled".to_string(),
        ));
    }

    logger::warn(&format!("Unauthenticated theme activation for id: {}", id));
    activate(&app_state, &id).await
}

async fn activate(app_state: &AppState, id: &str) -> Result<Json<ApiResponse<ThemeDto>>, ApiError> {
    let theme = app_state.theme_service.activate_theme(id).await?;
    app_state.active_theme_cache.invalidate().await;

    logger::info(&format!("Active theme is now {} ({})", theme.name, theme.id));
    Ok(Json(ApiResponse::ok(theme.into())))
}

/// The active theme, or null when none has been activated
pub async fn get_active_theme(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let theme = app_state.active_theme_cache.get().await;

    (
        [(CACHE_CONTROL, NO_STORE)],
        Json(ApiResponse::ok(theme.map(ThemeDto::from))),
    )
}

/// The active theme rendered as a `:root` rule of CSS custom properties
pub async fn get_active_theme_css(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let theme = app_state.active_theme_cache.get().await;

    let mut css = CssVariables::new();
    apply_theme(theme.as_ref(), &mut css);

    (
        [
            (CACHE_CONTROL, NO_STORE),
            (CONTENT_TYPE, "text/css; charset=utf-8"),
        ],
        css.to_root_rule(),
    )
}

pub async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::acknowledged("ok"))
}

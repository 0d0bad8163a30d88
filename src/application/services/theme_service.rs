use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::errors::DomainError;
use crate::domain::models::theme::{default_themes, Theme, ThemeVariables};
use crate::domain::repositories::theme_repository::ThemeRepository;

/// Service for managing themes and the single active theme
pub struct ThemeService {
    theme_repository: Arc<dyn ThemeRepository>,
}

impl ThemeService {
    /// Create a new ThemeService
    pub fn new(theme_repository: Arc<dyn ThemeRepository>) -> Self {
        Self { theme_repository }
    }

    /// List every theme
    pub async fn list_themes(&self) -> Result<Vec<Theme>, ApplicationError> {
        tracing::debug!("Listing themes");

        self.theme_repository.list_themes().await.map_err(|e| {
            tracing::error!("Failed to list themes: {}", e);
            e.into()
        })
    }

    /// Create a new, inactive theme
    pub async fn create_theme(
        &self,
        name: &str,
        variables: ThemeVariables,
    ) -> Result<Theme, ApplicationError> {
        tracing::info!("Creating theme: {}", name);

        let name = name.trim();
        if name.is_empty() {
            return Err(ApplicationError::ValidationError(
                "Theme name is required".to_string(),
            ));
        }
        if let Some(slot) = variables.first_blank() {
            return Err(ApplicationError::ValidationError(format!(
                "Theme variable '{}' is required",
                slot
            )));
        }

        let theme = Theme::new(name.to_string(), variables);
        self.theme_repository.insert_theme(&theme).await.map_err(|e| {
            tracing::error!("Failed to create theme {}: {}", name, e);
            ApplicationError::from(e)
        })?;

        Ok(theme)
    }

    /// Make `id` the only active theme
    pub async fn activate_theme(&self, id: &str) -> Result<Theme, ApplicationError> {
        tracing::info!("Activating theme: {}", id);

        self.theme_repository.activate_theme(id).await.map_err(|e| {
            tracing::error!("Failed to activate theme {}: {}", id, e);
            match e {
                DomainError::NotFound(_) => {
                    ApplicationError::NotFound(format!("Theme not found: {}", id))
                }
                _ => e.into(),
            }
        })
    }

    /// Get the active theme, if one has been activated
    pub async fn get_active_theme(&self) -> Result<Option<Theme>, ApplicationError> {
        tracing::debug!("Getting active theme");

        Ok(self.theme_repository.find_active_theme().await?)
    }

    /// Write the built-in themes into an empty store and make sure some theme is active.
    ///
    /// Returns the themes that were created. A populated store gets no new
    /// themes, but if none of them is active (for example after an interrupted
    /// first run) a fallback theme is activated.
    pub async fn seed_default_themes(&self) -> Result<Vec<Theme>, ApplicationError> {
        let existing = self.theme_repository.list_themes().await?;
        if existing.iter().any(|theme| theme.is_active) {
            tracing::debug!("Theme store already has an active theme, skipping seeding");
            return Ok(Vec::new());
        }

        let mut seeded = Vec::new();
        if existing.is_empty() {
            for theme in default_themes() {
                self.theme_repository.insert_theme(&theme).await?;
                seeded.push(theme);
            }
            tracing::info!("Seeded {} default themes", seeded.len());
        }

        let target = match seeded.first() {
            Some(first) => Some(first.id.clone()),
            None => fallback_theme_id(&existing),
        };
        if let Some(id) = target {
            let activated = self.theme_repository.activate_theme(&id).await?;
            tracing::info!("Activated {} as the default theme", activated.name);
            if let Some(first) = seeded.first_mut() {
                *first = activated;
            }
        }

        Ok(seeded)
    }
}

/// First built-in theme present in `themes`, otherwise the oldest one.
fn fallback_theme_id(themes: &[Theme]) -> Option<String> {
    default_themes()
        .iter()
        .find_map(|builtin| themes.iter().find(|theme| theme.has_name(&builtin.name)))
        .or_else(|| themes.iter().min_by_key(|theme| theme.created_at))
        .map(|theme| theme.id.clone())
}

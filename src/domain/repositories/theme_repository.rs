use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::theme::Theme;

/// Repository interface for managing themes
#[async_trait]
pub trait ThemeRepository: Send + Sync {
    /// List every stored theme
    async fn list_themes(&self) -> Result<Vec<Theme>, DomainError>;

    /// Find a theme by id
    async fn find_theme(&self, id: &str) -> Result<Option<Theme>, DomainError>;

    /// Find the theme currently flagged active
    async fn find_active_theme(&self) -> Result<Option<Theme>, DomainError>;

    /// Insert a new theme. Fails with `Conflict` when the name is taken.
    async fn insert_theme(&self, theme: &Theme) -> Result<(), DomainError>;

    /// Clear the active flag on every theme and set it on `id`, as one write.
    /// Fails with `NotFound` and leaves the store untouched when `id` is unknown.
    async fn activate_theme(&self, id: &str) -> Result<Theme, DomainError>;

    /// Delete a theme
    async fn delete_theme(&self, id: &str) -> Result<(), DomainError>;
}

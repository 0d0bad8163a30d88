use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::models::theme::Theme;
use crate::domain::repositories::theme_repository::ThemeRepository;
use crate::infrastructure::logging::logger;
use crate::infrastructure::persistence::file_system::{read_json_file, write_json_file};

/// On-disk layout of the theme store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ThemeDocument {
    #[serde(default)]
    themes: Vec<Theme>,
}

/// JSON document implementation of the ThemeRepository.
///
/// All themes live in one document. Every operation holds the document lock,
/// and mutations are written in full before the in-memory copy is replaced,
/// which makes each mutation a single transaction.
pub struct FileThemeRepository {
    themes_file: PathBuf,
    document: Mutex<Option<ThemeDocument>>,
}

impl FileThemeRepository {
    /// Create a new FileThemeRepository
    pub fn new(themes_file: PathBuf) -> Self {
        tracing::info!("Theme repository initialized with document: {:?}", themes_file);

        Self {
            themes_file,
            document: Mutex::new(None),
        }
    }

    async fn load_document(&self, slot: &mut Option<ThemeDocument>) -> Result<ThemeDocument, DomainError> {
        if let Some(document) = slot.as_ref() {
            return Ok(document.clone());
        }

        let document = match read_json_file::<ThemeDocument>(&self.themes_file).await {
            Ok(document) => document,
            Err(DomainError::NotFound(_)) => {
                logger::debug("Theme document missing, starting with an empty store");
                ThemeDocument::default()
            }
            Err(DomainError::InvalidData(message)) => {
                return Err(DomainError::InternalError(format!(
                    "Theme document is corrupt: {}",
                    message
                )));
            }
            Err(error) => return Err(error),
        };

        *slot = Some(document.clone());
        Ok(document)
    }

    async fn commit(
        &self,
        slot: &mut Option<ThemeDocument>,
        document: ThemeDocument,
    ) -> Result<(), DomainError> {
        write_json_file(&self.themes_file, &document).await?;
        *slot = Some(document);
        Ok(())
    }
}

#[async_trait]
impl ThemeRepository for FileThemeRepository {
    async fn list_themes(&self) -> Result<Vec<Theme>, DomainError> {
        let mut slot = self.document.lock().await;
        Ok(self.load_document(&mut slot).await?.themes)
    }

    async fn find_theme(&self, id: &str) -> Result<Option<Theme>, DomainError> {
        let mut slot = self.document.lock().await;
        let document = self.load_document(&mut slot).await?;

        Ok(document.themes.into_iter().find(|theme| theme.id == id))
    }

    async fn find_active_theme(&self) -> Result<Option<Theme>, DomainError> {
        let mut slot = self.document.lock().await;
        let document = self.load_document(&mut slot).await?;

        let mut active = document
            .themes
            .into_iter()
            .filter(|theme| theme.is_active)
            .collect::<Vec<_>>();

        if active.len() > 1 {
            // Only reachable when the document was edited outside this repository.
            logger::warn(&format!(
                "{} themes are flagged active, using the most recently updated",
                active.len()
            ));
            active.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        }

        Ok(active.into_iter().next())
    }

    async fn insert_theme(&self, theme: &Theme) -> Result<(), DomainError> {
        logger::debug(&format!("Inserting theme: {}", theme.name));

        let mut slot = self.document.lock().await;
        let mut document = self.load_document(&mut slot).await?;

        if document.themes.iter().any(|existing| existing.has_name(&theme.name)) {
            return Err(DomainError::Conflict(format!(
                "Theme name already exists: {}",
                theme.name
            )));
        }
        if document.themes.iter().any(|existing| existing.id == theme.id) {
            return Err(DomainError::Conflict(format!(
                "Theme id already exists: {}",
                theme.id
            )));
        }

        document.themes.push(theme.clone());
        self.commit(&mut slot, document).await
    }

    async fn activate_theme(&self, id: &str) -> Result<Theme, DomainError> {
        logger::debug(&format!("Activating theme: {}", id));

        let mut slot = self.document.lock().await;
        let mut document = self.load_document(&mut slot).await?;

        let Some(target) = document.themes.iter().position(|theme| theme.id == id) else {
            return Err(DomainError::NotFound(format!("Theme not found: {}", id)));
        };

        let now = Utc::now();
        for (index, theme) in document.themes.iter_mut().enumerate() {
            let should_be_active = index == target;
            if theme.is_active != should_be_active {
                theme.is_active = should_be_active;
                theme.updated_at = now;
            }
        }

        let activated = document.themes[target].clone();
        self.commit(&mut slot, document).await?;

        Ok(activated)
    }

    async fn delete_theme(&self, id: &str) -> Result<(), DomainError> {
        logger::debug(&format!("Deleting theme: {}", id));

        let mut slot = self.document.lock().await;
        let mut document = self.load_document(&mut slot).await?;

        let before = document.themes.len();
        document.themes.retain(|theme| theme.id != id);
        if document.themes.len() == before {
            return Err(DomainError::NotFound(format!("Theme not found: {}", id)));
        }

        self.commit(&mut slot, document).await
    }
}

use crate::domain::errors::DomainError;
use crate::infrastructure::logging::logger;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::{self as tokio_fs, create_dir_all, read_to_string};

/// Represents the application data directory structure
pub struct DataDirectory {
    root: PathBuf,
    themes_file: PathBuf,
    config_file: PathBuf,
    logs: PathBuf,
}

impl DataDirectory {
    /// Create a new DataDirectory instance
    pub fn new(root: PathBuf) -> Self {
        let themes_file = root.join("themes.json");
        let config_file = root.join("config.json");
        let logs = root.join("logs");

        Self {
            root,
            themes_file,
            config_file,
            logs,
        }
    }

    /// Initialize the data directory structure
    pub async fn initialize(&self) -> Result<(), DomainError> {
        tracing::info!("Initializing data directory at: {:?}", self.root);

        create_directory(&self.root).await?;
        create_directory(&self.logs).await?;

        tracing::info!("Data directory initialized successfully");
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the theme document path
    pub fn themes_file(&self) -> &Path {
        &self.themes_file
    }

    /// Get the config file path
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Get the log directory
    pub fn logs(&self) -> &Path {
        &self.logs
    }
}

/// Create a directory if it doesn't exist
async fn create_directory(path: &Path) -> Result<(), DomainError> {
    if !path.exists() {
        tracing::info!("Creating directory: {:?}", path);
        create_dir_all(path).await.map_err(|e| {
            tracing::error!("Failed to create directory {:?}: {}", path, e);
            DomainError::InternalError(format!("Failed to create directory: {}", e))
        })?;
    }
    Ok(())
}

/// Read a JSON file and deserialize it
///
/// A missing file maps to `DomainError::NotFound`, unparsable content to
/// `DomainError::InvalidData`.
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    logger::debug(&format!("Reading JSON file: {:?}", path));

    let contents = read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DomainError::NotFound(format!("File not found: {}", path.display()))
        } else {
            logger::error(&format!("Failed to read file {:?}: {}", path, e));
            DomainError::InternalError(format!("Failed to read file: {}", e))
        }
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        logger::error(&format!("Failed to parse JSON from file {:?}: {}", path, e));
        DomainError::InvalidData(format!("Invalid JSON: {}", e))
    })
}

/// Write a JSON file
///
/// The document is written to a sibling temporary file first and then renamed
/// over the target, so a concurrent reader sees either the old or the new
/// document in full.
pub async fn write_json_file<T: Serialize>(path: &Path, data: &T) -> Result<(), DomainError> {
    logger::debug(&format!("Writing JSON file: {:?}", path));

    if let Some(parent) = path.parent() {
        create_dir_all(parent).await.map_err(|e| {
            logger::error(&format!(
                "Failed to create parent directory for {:?}: {}",
                path, e
            ));
            DomainError::InternalError(format!("Failed to create directory: {}", e))
        })?;
    }

    let json = serde_json::to_string_pretty(data).map_err(|e| {
        logger::error(&format!(
            "Failed to serialize to JSON for file {:?}: {}",
            path, e
        ));
        DomainError::InvalidData(format!("Failed to serialize to JSON: {}", e))
    })?;

    let temp_path = path.with_extension("json.tmp");
    tokio_fs::write(&temp_path, json).await.map_err(|e| {
        logger::error(&format!("Failed to write to file {:?}: {}", temp_path, e));
        DomainError::InternalError(format!("Failed to write to file: {}", e))
    })?;

    tokio_fs::rename(&temp_path, path).await.map_err(|e| {
        logger::error(&format!("Failed to replace file {:?}: {}", path, e));
        DomainError::InternalError(format!("Failed to replace file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::random;
    use serde_json::json;

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("portfolio-fs-{}", random::<u64>()))
    }

    #[tokio::test]
    async fn write_then_read_leaves_no_temporary_file() {
        let root = unique_temp_root();
        let path = root.join("nested").join("doc.json");

        write_json_file(&path, &json!({ "themes": [] }))
            .await
            .expect("write document");
        let value: serde_json::Value = read_json_file(&path).await.expect("read document");

        assert_eq!(value, json!({ "themes": [] }));
        assert!(!path.with_extension("json.tmp").exists());

        let _ = tokio_fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let root = unique_temp_root();
        let result = read_json_file::<serde_json::Value>(&root.join("absent.json")).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn malformed_file_is_invalid_data() {
        let root = unique_temp_root();
        let path = root.join("broken.json");
        create_dir_all(&root).await.expect("create root");
        tokio_fs::write(&path, "{ not json").await.expect("write broken");

        let result = read_json_file::<serde_json::Value>(&path).await;
        assert!(matches!(result, Err(DomainError::InvalidData(_))));

        let _ = tokio_fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn initialize_creates_root_and_logs() {
        let root = unique_temp_root();
        let directory = DataDirectory::new(root.clone());

        directory.initialize().await.expect("initialize");

        assert!(directory.logs().is_dir());
        assert_eq!(directory.themes_file(), root.join("themes.json"));

        let _ = tokio_fs::remove_dir_all(&root).await;
    }
}

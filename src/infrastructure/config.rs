use std::path::Path;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::file_system::{read_json_file, write_json_file};

/// Application configuration, persisted as `config.json` in the data root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub security: SecurityConfig,
    pub client: ClientConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub active_theme_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Key for signing admin session cookies. Generated on first run when empty.
    pub session_secret: String,

    /// Keep the unauthenticated `activate-public` route enabled.
    pub allow_public_activation: bool,
}

/// Retry settings for the theme loader
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub max_attempts: u32,
    pub backoff_step_millis: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            active_theme_ttl_secs: 300,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            allow_public_activation: true,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step_millis: 350,
        }
    }
}

impl CacheConfig {
    pub fn active_theme_ttl(&self) -> Duration {
        Duration::from_secs(self.active_theme_ttl_secs)
    }
}

impl AppConfig {
    /// Load the config file, creating it with defaults when absent.
    /// A missing session secret is generated and written back.
    pub async fn load(path: &Path) -> Result<Self, DomainError> {
        let (mut config, mut dirty) = match read_json_file::<AppConfig>(path).await {
            Ok(config) => (config, false),
            Err(DomainError::NotFound(_)) => {
                tracing::info!("No config at {:?}, writing defaults", path);
                (AppConfig::default(), true)
            }
            Err(error) => return Err(error),
        };

        if config.security.session_secret.trim().is_empty() {
            config.security.session_secret = generate_secret();
            dirty = true;
        }

        if dirty {
            write_json_file(path, &config).await?;
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override file values with `PORTFOLIO_*` environment variables.
    /// Overrides are never written back to disk.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("PORTFOLIO_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("PORTFOLIO_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORTFOLIO_PORT: {}", port),
            }
        }

        if let Some(secret) = lookup("PORTFOLIO_SESSION_SECRET").filter(|s| !s.trim().is_empty()) {
            self.security.session_secret = secret;
        }
    }
}

fn generate_secret() -> String {
    BASE64_URL.encode(rand::random::<[u8; 32]>())
}

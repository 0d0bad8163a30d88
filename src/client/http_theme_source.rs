use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::application::dto::api_response::ApiResponse;
use crate::client::theme_loader::{ThemeFetchError, ThemeSource};
use crate::domain::models::theme::Theme;
use crate::infrastructure::http_client::build_http_client;

/// Reads the active theme from a running portfolio server
pub struct HttpThemeSource {
    client: Client,
    endpoint: Url,
}

impl HttpThemeSource {
    pub fn new(base_url: &str) -> Result<Self, ThemeFetchError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let endpoint = Url::parse(&base)
            .and_then(|base| base.join("themes/active"))
            .map_err(|e| ThemeFetchError::Request(format!("Invalid base URL {}: {}", base_url, e)))?;
        let client = build_http_client(ClientBuilder::new())
            .map_err(|e| ThemeFetchError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ThemeSource for HttpThemeSource {
    async fn fetch_active_theme(&self) -> Result<Option<Theme>, ThemeFetchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ThemeFetchError::Request(e.to_string()))?;

        let body: ApiResponse<Theme> = response
            .json()
            .await
            .map_err(|e| ThemeFetchError::Response(e.to_string()))?;

        if !body.success {
            return Err(ThemeFetchError::Response(
                body.error.unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }

        Ok(body.data)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::errors::ApplicationError;
use crate::domain::models::theme::{Theme, ThemeVariables};

/// DTO for creating a theme.
///
/// Every field is optional on the wire so that a missing field is reported
/// as a validation message instead of a deserialization failure.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateThemeDto {
    pub name: Option<String>,
    pub variables: Option<ThemeVariablesDto>,
}

/// The six colour slots as submitted by the admin form
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeVariablesDto {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub accent: Option<String>,
    pub border: Option<String>,
}

impl CreateThemeDto {
    /// Check required fields in declaration order and return the first violation.
    pub fn into_parts(self) -> Result<(String, ThemeVariables), ApplicationError> {
        let name = required("name", self.name, "Theme name is required")?;
        let variables = self.variables.ok_or_else(|| {
            ApplicationError::ValidationError("Theme variables are required".to_string())
        })?;

        Ok((name, variables.try_into()?))
    }
}

impl TryFrom<ThemeVariablesDto> for ThemeVariables {
    type Error = ApplicationError;

    fn try_from(dto: ThemeVariablesDto) -> Result<Self, Self::Error> {
        Ok(Self {
            primary: variable("primary", dto.primary)?,
            secondary: variable("secondary", dto.secondary)?,
            background: variable("background", dto.background)?,
            foreground: variable("foreground", dto.foreground)?,
            accent: variable("accent", dto.accent)?,
            border: variable("border", dto.border)?,
        })
    }
}

fn variable(slot: &str, value: Option<String>) -> Result<String, ApplicationError> {
    required(
        slot,
        value,
        &format!("Theme variable '{}' is required", slot),
    )
}

fn required(field: &str, value: Option<String>, message: &str) -> Result<String, ApplicationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => {
            tracing::debug!("Rejected theme payload: missing {}", field);
            Err(ApplicationError::ValidationError(message.to_string()))
        }
    }
}

/// DTO for theme responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDto {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub variables: ThemeVariables,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Theme> for ThemeDto {
    fn from(theme: Theme) -> Self {
        Self {
            id: theme.id,
            name: theme.name,
            is_active: theme.is_active,
            variables: theme.variables,
            created_at: theme.created_at,
            updated_at: theme.updated_at,
        }
    }
}

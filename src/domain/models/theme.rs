use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The six colour slots every theme must define.
pub const THEME_VARIABLE_NAMES: [&str; 6] = [
    "primary",
    "secondary",
    "background",
    "foreground",
    "accent",
    "border",
];

/// Colour values for a theme. Each field holds a CSS colour string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeVariables {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub foreground: String,
    pub accent: String,
    pub border: String,
}

impl ThemeVariables {
    /// Pairs each slot name with its value, in `THEME_VARIABLE_NAMES` order.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("background", self.background.as_str()),
            ("foreground", self.foreground.as_str()),
            ("accent", self.accent.as_str()),
            ("border", self.border.as_str()),
        ]
    }

    /// Name of the first slot whose value is blank, if any.
    pub fn first_blank(&self) -> Option<&'static str> {
        self.entries()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
    }
}

/// A named colour theme. At most one theme is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub variables: ThemeVariables,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Theme {
    /// Create a new, inactive theme with a fresh id
    pub fn new(name: String, variables: ThemeVariables) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            is_active: false,
            variables,
            created_at: now,
            updated_at: now,
        }
    }

    /// Theme names compare case-insensitively and ignore surrounding whitespace.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

/// Built-in themes written to an empty store on first run.
/// The first entry is activated after seeding.
pub fn default_themes() -> Vec<Theme> {
    vec![
        Theme::new(
            "Light".to_string(),
            ThemeVariables {
                primary: "#2563eb".to_string(),
                secondary: "#64748b".to_string(),
                background: "#ffffff".to_string(),
                foreground: "#0f172a".to_string(),
                accent: "#f59e0b".to_string(),
                border: "#e2e8f0".to_string(),
            },
        ),
        Theme::new(
            "Dark".to_string(),
            ThemeVariables {
                primary: "#60a5fa".to_string(),
                secondary: "#94a3b8".to_string(),
                background: "#0b1120".to_string(),
                foreground: "#f8fafc".to_string(),
                accent: "#fbbf24".to_string(),
                border: "#1e293b".to_string(),
            },
        ),
        Theme::new(
            "Ocean".to_string(),
            ThemeVariables {
                primary: "#0ea5e9".to_string(),
                secondary: "#14b8a6".to_string(),
                background: "#f0f9ff".to_string(),
                foreground: "#082f49".to_string(),
                accent: "#f97316".to_string(),
                border: "#bae6fd".to_string(),
            },
        ),
    ]
}

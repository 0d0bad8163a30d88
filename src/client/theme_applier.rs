use crate::domain::models::theme::Theme;

/// Something that accepts global styling variables, such as a document root.
pub trait StyleTarget {
    fn set_property(&mut self, name: &str, value: &str);
}

/// CSS custom property a theme slot is published under
pub fn css_variable_name(slot: &str) -> String {
    format!("--{}", slot)
}

/// Publish every theme variable on `target`. Does nothing without a theme.
pub fn apply_theme(theme: Option<&Theme>, target: &mut impl StyleTarget) {
    let Some(theme) = theme else {
        return;
    };

    for (slot, value) in theme.variables.entries() {
        target.set_property(&css_variable_name(slot), value);
    }
}

/// Ordered set of custom properties rendered as a `:root` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssVariables {
    properties: Vec<(String, String)>,
}

impl CssVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn to_root_rule(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.properties {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
        css.push_str("}\n");
        css
    }
}

impl StyleTarget for CssVariables {
    fn set_property(&mut self, name: &str, value: &str) {
        // Values end up inside a stylesheet; anything that could close the
        // declaration or the rule is dropped.
        if value.contains([';', '{', '}', '<', '>', '\n', '\r']) {
            tracing::warn!("Skipping unsafe value for CSS variable {}", name);
            return;
        }

        match self.properties.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.properties.push((name.to_string(), value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::theme::default_themes;

    #[test]
    fn applies_all_six_variables() {
        let theme = default_themes().remove(0);
        let mut css = CssVariables::new();

        apply_theme(Some(&theme), &mut css);

        assert_eq!(css.get("--primary"), Some(theme.variables.primary.as_str()));
        assert_eq!(css.get("--border"), Some(theme.variables.border.as_str()));
        assert_eq!(css.to_root_rule().lines().count(), 8);
    }

    #[test]
    fn no_theme_is_a_no_op() {
        let mut css = CssVariables::new();

        apply_theme(None, &mut css);

        assert!(css.is_empty());
        assert_eq!(css.to_root_rule(), ":root {\n}\n");
    }

    #[test]
    fn reapplying_overwrites_previous_values() {
        let mut themes = default_themes();
        let second = themes.remove(1);
        let first = themes.remove(0);
        let mut css = CssVariables::new();

        apply_theme(Some(&first), &mut css);
        apply_theme(Some(&second), &mut css);

        assert_eq!(css.get("--background"), Some(second.variables.background.as_str()));
        assert_eq!(css.to_root_rule().lines().count(), 8);
    }

    #[test]
    fn unsafe_values_are_skipped() {
        let mut theme = default_themes().remove(0);
        theme.variables.accent = "red; } body { display: none".to_string();
        let mut css = CssVariables::new();

        apply_theme(Some(&theme), &mut css);

        assert_eq!(css.get("--accent"), None);
        assert!(css.get("--primary").is_some());
    }
}

pub const DEFAULT_THEME_COLOR: &str = "#333";

const DEFAULT_RULES: &[(&str, &str)] = &[("psu.edu", "navy")];

/// Maps URL substrings to accent colors.
///
/// Rules added with [`ThemePolicy::with_rule`] are checked before the built-in
/// ones, in the order they were added. First match wins.
#[derive(Debug, Clone)]
pub struct ThemePolicy {
    rules: Vec<(String, String)>,
    builtin: Vec<(String, String)>,
    fallback: String,
}

impl Default for ThemePolicy {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            builtin: DEFAULT_RULES
                .iter()
                .map(|(pattern, color)| (pattern.to_string(), color.to_string()))
                .collect(),
            fallback: DEFAULT_THEME_COLOR.to_string(),
        }
    }
}

impl ThemePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, pattern: impl Into<String>, color: impl Into<String>) -> Self {
        self.rules.push((pattern.into(), color.into()));
        self
    }

    pub fn with_fallback(mut self, color: impl Into<String>) -> Self {
        self.fallback = color.into();
        self
    }

    pub fn color_for(&self, url: &str) -> &str {
        self.rules
            .iter()
            .chain(&self.builtin)
            .find(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, color)| color.as_str())
            .unwrap_or(&self.fallback)
    }
}

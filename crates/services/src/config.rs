use std::env;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_KEY_VARS: [&str; 2] = ["TUTOR_AI_API_KEY", "API_KEY"];
const BASE_URL_VAR: &str = "TUTOR_AI_BASE_URL";
const MODEL_VAR: &str = "TUTOR_AI_MODEL";

#[derive(Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl ModelConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
        }
    }

    /// Read the model settings from the process environment.
    ///
    /// Returns `None` when no API key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = API_KEY_VARS.iter().find_map(|key| non_empty(*key))?;
        let base_url = non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = non_empty(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_key_disables_config() {
        assert_eq!(ModelConfig::from_lookup(lookup(&[])), None);
        assert_eq!(
            ModelConfig::from_lookup(lookup(&[("TUTOR_AI_API_KEY", "  ")])),
            None
        );
    }

    #[test]
    fn defaults_fill_unset_values() {
        let config = ModelConfig::from_lookup(lookup(&[("API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn tutor_key_wins_over_generic_key() {
        let config = ModelConfig::from_lookup(lookup(&[
            ("API_KEY", "generic"),
            ("TUTOR_AI_API_KEY", "specific"),
            ("TUTOR_AI_MODEL", "gemini-2.5-pro"),
            ("TUTOR_AI_BASE_URL", "http://localhost:8080"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "specific");
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", ModelConfig::new("secret-key"));
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("[redacted]"));
    }
}

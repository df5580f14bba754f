use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Where the client looks for its configuration.
pub const CONFIG_PATH: &str = "/admin/config.json";

const FALLBACK_LOCALE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub locale: String,
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub locales: Vec<LocaleConfig>,
    #[serde(rename = "defaultLocale", default = "fallback_locale")]
    pub default_locale: String,
    pub api_root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger: Option<LoggerConfig>,
}

fn fallback_locale() -> String {
    FALLBACK_LOCALE.to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("api_root must not be empty")]
    MissingApiRoot,
    #[error("locale `{0}` is configured more than once")]
    DuplicateLocale(String),
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_json::from_str(text)?;
        config.normalize()?;
        Ok(config)
    }

    /// Trims the api root and rejects configurations the client can't use.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        let api_root = self.api_root.trim().trim_end_matches('/');
        if api_root.is_empty() {
            return Err(ConfigError::MissingApiRoot);
        }
        self.api_root = api_root.to_string();

        if self.default_locale.trim().is_empty() {
            self.default_locale = fallback_locale();
        }

        let mut seen = HashSet::new();
        for locale in &self.locales {
            if !seen.insert(locale.locale.as_str()) {
                return Err(ConfigError::DuplicateLocale(locale.locale.clone()));
            }
        }
        Ok(())
    }

    pub fn locale(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.locale == code)
    }
}

#[cfg(test)]
pub(crate) fn sample() -> Config {
    Config::from_json(
        r#"{
            "locales": [
                {"locale": "en", "name": "english", "prefix": "/en"},
                {"locale": "fr", "name": "french", "prefix": "/fr"}
            ],
            "defaultLocale": "en",
            "api_root": "https://api.example.org/"
        }"#,
    )
    .unwrap()
}

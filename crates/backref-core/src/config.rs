//! backref configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default web app origin used for entry deep links
pub const DEFAULT_APP_BASE_URL: &str = "https://app.contentful.com";

/// Title used when an entry has no usable display value
pub const DEFAULT_UNTITLED: &str = "Untitled";

/// backref configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackrefConfig {
    /// Web app origin for entry links
    pub app_base_url: String,
    /// Placeholder title
    pub untitled_title: String,
    /// Maximum title projections in flight at once
    pub title_concurrency: usize,
    /// Locale used for titles instead of the host default
    pub default_locale_override: Option<String>,
}

impl BackrefConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With app base url
    #[inline]
    #[must_use]
    pub fn with_app_base_url(mut self, url: impl Into<String>) -> Self {
        self.app_base_url = url.into();
        self
    }

    /// With title concurrency
    #[inline]
    #[must_use]
    pub fn with_title_concurrency(mut self, n: usize) -> Self {
        self.title_concurrency = n;
        self
    }

    /// With locale override
    #[inline]
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale_override = Some(locale.into());
        self
    }

    /// Parse and validate TOML
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title_concurrency == 0 {
            return Err(ConfigError::Invalid {
                field: "title_concurrency",
                message: "must be at least 1".into(),
            });
        }
        if self.app_base_url.is_empty() {
            return Err(ConfigError::Invalid {
                field: "app_base_url",
                message: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl Default for BackrefConfig {
    fn default() -> Self {
        Self {
            app_base_url: DEFAULT_APP_BASE_URL.into(),
            untitled_title: DEFAULT_UNTITLED.into(),
            title_concurrency: 8,
            default_locale_override: None,
        }
    }
}

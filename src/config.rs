//! Client configuration.
//!
//! The catalog service's base URL is deployment configuration, not a contract. It is
//! read from a TOML file when one is given and may be overridden from the environment:
//!
//! ```toml
//! base_url = "http://localhost:9090"
//! page_size = 20
//! ```
//!
//! - `STOREFRONT_API_URL` overrides `base_url`
//! - `STOREFRONT_PAGE_SIZE` overrides `page_size`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9090";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page sizes offered by the list screen.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 20, 100];

pub const ENV_BASE_URL: &str = "STOREFRONT_API_URL";
pub const ENV_PAGE_SIZE: &str = "STOREFRONT_PAGE_SIZE";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the catalog service, without a trailing `/api`.
    pub base_url: String,
    /// Page size used for the first list fetch.
    pub page_size: u32,
    /// Per-request timeout. `None` lets a hung request wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validated()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Applies `STOREFRONT_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            self.page_size = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PAGE_SIZE,
                value: raw.clone(),
            })?;
        }
        self.validated()
    }

    /// Applies values given on the command line, which win over file and environment.
    pub fn with_flags(
        mut self,
        base_url: Option<String>,
        page_size: Option<u32>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(size) = page_size {
            self.page_size = size;
        }
        self.validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "base_url",
                value: self.base_url,
            });
        }
        self.base_url = trimmed.to_string();
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size",
                value: "0".to_string(),
            });
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:9090");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_parses_partial_toml_and_strips_trailing_slash() {
        let config = ClientConfig::from_toml_str("base_url = \"http://shop:8080/\"\n").unwrap();
        assert_eq!(config.base_url, "http://shop:8080");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let result = ClientConfig::from_toml_str("page_size = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { key: "page_size", .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://catalog:9090"),
            (ENV_PAGE_SIZE, "20"),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.base_url, "http://catalog:9090");
        assert_eq!(config.page_size, 20);

        let bad = ClientConfig::default().with_overrides(|key| {
            (key == ENV_PAGE_SIZE).then(|| "many".to_string())
        });
        assert!(matches!(bad, Err(ConfigError::InvalidValue { key: ENV_PAGE_SIZE, .. })));
    }

    #[test]
    fn test_flags_are_validated_like_other_sources() {
        let config = ClientConfig::default()
            .with_flags(Some("http://shop:8080//".into()), Some(20))
            .unwrap();
        assert_eq!(config.base_url, "http://shop:8080");
        assert_eq!(config.page_size, 20);

        let blank = ClientConfig::default().with_flags(Some("  ".into()), None);
        assert!(matches!(blank, Err(ConfigError::InvalidValue { key: "base_url", .. })));
        let zero = ClientConfig::default().with_flags(None, Some(0));
        assert!(matches!(zero, Err(ConfigError::InvalidValue { key: "page_size", .. })));

        let untouched = ClientConfig::default().with_flags(None, None).unwrap();
        assert_eq!(untouched, ClientConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://localhost:8080\"").unwrap();
        writeln!(file, "request_timeout_secs = 5").unwrap();
        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }
}

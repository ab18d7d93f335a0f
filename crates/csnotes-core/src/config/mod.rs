//! Client configuration.
//!
//! `ClientConfig` is the persisted form (`config.json`); front-ends layer
//! flags and environment overrides on top before calling
//! [`ClientConfig::resolved_base_url`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Returns a copy with `api_base_url` replaced when `url` is non-empty.
    #[must_use]
    pub fn with_base_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = non_blank(url) {
            self.api_base_url = Some(url);
        }
        self
    }

    /// Normalized base URL, falling back to [`DEFAULT_API_BASE_URL`].
    pub fn resolved_base_url(&self) -> Result<String> {
        non_blank(self.api_base_url.clone()).map_or_else(
            || Ok(DEFAULT_API_BASE_URL.to_string()),
            |url| normalize_base_url(&url),
        )
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Load config from `path`; a missing file is the default config.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let normalized = Self {
            api_base_url: non_blank(self.api_base_url.clone()),
            request_timeout_secs: self.request_timeout_secs,
        };
        std::fs::write(path, serde_json::to_string_pretty(&normalized)?)?;
        Ok(())
    }
}

/// Trim whitespace and trailing slashes; require an http(s) scheme.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(Error::InvalidConfiguration(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(Error::InvalidConfiguration(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base.to_string())
}

/// Blank strings from flags, env and config files count as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("   ").is_err());
        assert!(normalize_base_url("example.com").is_err());
    }

    #[test]
    fn normalize_base_url_requires_http_scheme() {
        assert!(normalize_base_url("ftp://notes.example.com").is_err());
        assert!(normalize_base_url("localhost:8080").is_err());
        assert_eq!(
            normalize_base_url("http://localhost:8080").unwrap(),
            DEFAULT_API_BASE_URL
        );
    }

    #[test]
    fn blank_stored_url_falls_back_to_default() {
        let config = ClientConfig {
            api_base_url: Some(" \t".to_string()),
            request_timeout_secs: None,
        };
        assert_eq!(config.resolved_base_url().unwrap(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        assert_eq!(
            normalize_base_url(" https://notes.example.com/ ").unwrap(),
            "https://notes.example.com"
        );
    }

    #[test]
    fn resolved_base_url_defaults_when_unset() {
        let config = ClientConfig::default();
        assert_eq!(config.resolved_base_url().unwrap(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn override_wins_over_stored_url() {
        let config = ClientConfig {
            api_base_url: Some("http://stored.example.com".to_string()),
            request_timeout_secs: None,
        }
        .with_base_url_override(Some("http://flag.example.com/".to_string()));
        assert_eq!(
            config.resolved_base_url().unwrap(),
            "http://flag.example.com"
        );
    }

    #[test]
    fn blank_override_keeps_stored_url() {
        let config = ClientConfig {
            api_base_url: Some("http://stored.example.com".to_string()),
            request_timeout_secs: None,
        }
        .with_base_url_override(Some("  ".to_string()));
        assert_eq!(
            config.resolved_base_url().unwrap(),
            "http://stored.example.com"
        );
    }

    #[test]
    fn request_timeout_ignores_zero() {
        let config = ClientConfig {
            api_base_url: None,
            request_timeout_secs: Some(0),
        };
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed = serde_json::from_str::<ClientConfig>(r#"{"api_url":"http://x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = ClientConfig {
            api_base_url: Some(" http://notes.local ".to_string()),
            request_timeout_secs: Some(3),
        };

        config.save_to_path(&path).unwrap();
        let loaded = ClientConfig::load_from_path(&path).unwrap();

        assert_eq!(loaded.api_base_url.as_deref(), Some("http://notes.local"));
        assert_eq!(loaded.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ClientConfig::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, ClientConfig::default());
    }
}

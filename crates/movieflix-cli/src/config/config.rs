//! `AppConfig` struct and TOML loading.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default search debounce in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Browser behaviour.
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// TMDB connection configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// v3 API key; `TMDB_API_KEY` takes precedence.
    #[serde(default)]
    pub api_key: Option<String>,
    /// API base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Browser configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Quiet period before a search is sent, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

const fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl BrowserConfig {
    /// Debounce as a `Duration`.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Picks the API key: a non-blank `env_key` wins over the config file.
    #[must_use]
    pub fn api_key(&self, env_key: Option<String>) -> Option<String> {
        env_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.tmdb
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.tmdb.api_key.is_none());
        assert_eq!(config.browser.debounce_ms, 300);
        assert_eq!(config.browser.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_full_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[tmdb]\napi_key = \"abc123\"\nbase_url = \"http://localhost:8080/3/\"\n\n[browser]\ndebounce_ms = 150\n",
        )
        .unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(
            config,
            AppConfig {
                tmdb: TmdbConfig {
                    api_key: Some(String::from("abc123")),
                    base_url: Some(String::from("http://localhost:8080/3/")),
                },
                browser: BrowserConfig { debounce_ms: 150 },
            }
        );
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb]\napi_key = \"k\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.api_key.as_deref(), Some("k"));
        assert_eq!(config.browser, BrowserConfig::default());
    }

    #[test]
    fn test_load_empty_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[browser\ndebounce_ms = ").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_env_key_wins_over_config() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_key: Some(String::from("from-file")),
                base_url: None,
            },
            ..AppConfig::default()
        };

        // Act & Assert
        assert_eq!(
            config.api_key(Some(String::from("from-env"))).as_deref(),
            Some("from-env")
        );
        assert_eq!(
            config.api_key(Some(String::from("  "))).as_deref(),
            Some("from-file")
        );
        assert_eq!(config.api_key(None).as_deref(), Some("from-file"));
        assert_eq!(AppConfig::default().api_key(None), None);
    }
}

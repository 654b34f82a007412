//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\playlist-mirror\config.toml
//! - macOS: ~/Library/Application Support/playlist-mirror/config.toml
//! - Linux: ~/.config/playlist-mirror/config.toml
//!
//! The config file is human-readable and editable. It holds the API token,
//! scraper tuning, and the list of upstream sources to resolve.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::model::UpstreamSource;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Public-page scraper settings
    pub scraper: ScraperConfig,

    /// Upstream sources resolved when none are given on the command line
    pub sources: Vec<UpstreamSource>,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Spotify Web API access token
    pub spotify_access_token: Option<String>,
}

/// Scraper pathway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Append the scraper to the resolver chain
    pub enabled: bool,

    /// Lifetime of cached scrape results, negative ones included
    pub cache_ttl_secs: u64,

    /// Timeout for each page fetch
    pub timeout_secs: u64,

    /// Cache directory override (defaults to the user cache directory)
    pub cache_dir: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cache_ttl_secs: 6 * 60 * 60,
            timeout_secs: 10,
            cache_dir: None,
        }
    }
}

/// Upper bound on the scrape cache lifetime (one year)
const MAX_CACHE_TTL_SECS: u64 = 365 * 24 * 60 * 60;

impl ScraperConfig {
    /// Cache entry lifetime, at most one year.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs.min(MAX_CACHE_TTL_SECS))
    }

    /// Fetch timeout, never zero.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("playlist-mirror"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    // Ensure directory exists
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDir(dir.clone(), e))?;

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceType;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[scraper]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.credentials.spotify_access_token = Some("test-token".to_string());
        config.scraper.enabled = true;
        config.sources.push(UpstreamSource::external_playlist("abc"));
        config.sources.push(UpstreamSource::search("lofi beats"));

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(
            parsed.credentials.spotify_access_token,
            Some("test-token".to_string())
        );
        assert!(parsed.scraper.enabled);
        assert_eq!(parsed.sources, config.sources);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[[sources]]
source_type = "search_query"
search_query = "city pop"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified field is set
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].source_type, SourceType::SearchQuery);

        // Other fields use defaults
        assert!(config.credentials.spotify_access_token.is_none());
        assert!(!config.scraper.enabled);
        assert_eq!(config.scraper.cache_ttl(), Duration::from_secs(21600));
        assert_eq!(config.scraper.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_huge_cache_ttl_is_clamped() {
        let config = ScraperConfig {
            cache_ttl_secs: u64::MAX,
            ..Default::default()
        };
        assert_eq!(
            config.cache_ttl(),
            Duration::from_secs(MAX_CACHE_TTL_SECS)
        );
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = ScraperConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }
}

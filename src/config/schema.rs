//! Configuration schema for modelfetch
//!
//! Configuration is stored at `~/.config/modelfetch/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// On-disk cache layout
    pub cache: CacheConfig,

    /// Download settings
    pub fetch: FetchConfig,

    /// Entry-point selection
    pub locate: LocateConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Cache directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root (default: platform cache dir + "modelfetch")
    pub root: Option<PathBuf>,

    /// Subdirectory of the root holding one directory per asset
    pub models_dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: None,
            models_dir: "Models".to_string(),
        }
    }
}

impl CacheConfig {
    /// The effective cache root
    pub fn root_dir(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(default_cache_root)
    }

    /// Directory holding the per-asset directories
    pub fn models_root(&self) -> PathBuf {
        self.root_dir().join(&self.models_dir)
    }
}

/// Platform cache directory for modelfetch
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("modelfetch")
}

/// Download configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Overall request timeout in seconds (unset = transport default)
    pub timeout_secs: Option<u64>,

    /// User-Agent header override
    pub user_agent: Option<String>,
}

/// Content locator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    /// Extension of the entry-point file to look for
    pub extension: String,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            extension: "gltf".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[locate]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.locate.extension, "gltf");
        assert_eq!(config.cache.models_dir, "Models");
        assert!(config.fetch.timeout_secs.is_none());
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [cache]
            root = "/var/cache/assets"

            [fetch]
            timeout_secs = 30
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.cache.models_root(),
            PathBuf::from("/var/cache/assets/Models")
        );
        assert_eq!(config.fetch.timeout_secs, Some(30));
        assert_eq!(config.locate.extension, "gltf"); // default preserved
    }
}

//! Configuration management for omniport.
//!
//! Configuration is read from `~/.config/omniport/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! Command-line flags override individual values after loading.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api-prod.omnivore.app/api/graphql";
pub const DEFAULT_LABEL: &str = "IMPORT/Evernote";
pub const DEFAULT_SOURCE: &str = "api";
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://evernote.com";
pub const DEFAULT_CACHE_FILE: &str = ".cache";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub omnivore: OmnivoreConfig,
    pub migration: MigrationConfig,
    pub http: HttpConfig,
}

/// Remote read-it-later service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OmnivoreConfig {
    /// GraphQL endpoint
    pub endpoint: String,

    /// API key sent in the `authorization` header
    pub api_key: Option<String>,
}

impl Default for OmnivoreConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Label attached to every saved note
    pub label: String,

    /// Source tag sent with each save request
    pub source: String,

    /// URL used for notes without a source URL
    pub placeholder_url: String,

    /// Dedup cache file, one identifier per line
    pub cache_file: PathBuf,

    /// Additional tracking-suffix regexes, applied after the built-in ones
    pub extra_tracking_patterns: Vec<String>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            extra_tracking_patterns: Vec::new(),
        }
    }
}

/// Outbound HTTP client settings shared by the probe and the publisher.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Browser-like user agent; some sites block non-browser clients
    pub user_agent: String,

    /// Accept header sent with reachability probes
    pub accept: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/omniport/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("omniport").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# omniport configuration
#
# Values given on the command line take precedence over this file.

[omnivore]
# GraphQL endpoint of the read-it-later service
endpoint = "https://api-prod.omnivore.app/api/graphql"

# API key (can also be given with --api-key or OMNIVORE_API_KEY)
# api_key = "..."

[migration]
# Label attached to every imported note
label = "IMPORT/Evernote"

# Source tag sent with each save request
source = "api"

# URL used for notes that have no source URL
placeholder_url = "https://evernote.com"

# Identifiers of already published notes, one per line
cache_file = ".cache"

# Extra tracking-parameter patterns (regular expressions), applied after the
# built-in utm_*/mkt_tok/... patterns
extra_tracking_patterns = []

[http]
# Request timeout in seconds
timeout_secs = 30
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

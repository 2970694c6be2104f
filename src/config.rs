//! Configuration management for suckson
//!
//! Settings come from, in increasing precedence: built-in defaults, a TOML
//! config file, environment variables, and finally command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ClientConfig, FetcherConfig, TemplateSources};
use crate::constants::{acquisition, config as paths, env, http};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Download and extraction settings
    pub acquisition: AcquisitionConfigToml,
    /// Archive URL per template
    pub templates: TemplateSources,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// User agent sent with each request
    pub user_agent: String,
    /// Connect timeout, e.g. "30s"
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// TCP keep-alive in seconds (None = disabled)
    pub tcp_keepalive_secs: Option<u64>,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            user_agent: http::USER_AGENT.to_string(),
            connect_timeout: http::CONNECT_TIMEOUT,
            tcp_keepalive_secs: Some(http::TCP_KEEPALIVE.as_secs()),
            tcp_nodelay: true,
        }
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            user_agent: self.user_agent.clone(),
            connect_timeout: self.connect_timeout,
            tcp_keepalive: self.tcp_keepalive_secs.map(Duration::from_secs),
            tcp_nodelay: self.tcp_nodelay,
        }
    }
}

/// TOML-friendly acquisition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfigToml {
    /// Budget for download plus extraction, e.g. "60s" or "2m"
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Prefix prepended to every archive URL
    pub mirror: Option<String>,
    /// Largest archive accepted, in bytes
    pub max_archive_bytes: u64,
}

impl Default for AcquisitionConfigToml {
    fn default() -> Self {
        Self {
            timeout: acquisition::FETCH_TIMEOUT,
            mirror: None,
            max_archive_bytes: acquisition::MAX_ARCHIVE_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (if exists)
    /// 3. Environment variables
    ///
    /// CLI overrides are applied by the caller.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an explicitly given file is missing, any file
    /// cannot be read or parsed, or an environment override is invalid
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        if let Some(path) = config_path {
            debug!("Loading config from: {}", path.display());
            config = Self::load_from_file(&path).await?;
        }

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(".").join(paths::LOCAL_FILE_NAME)];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        for path in search_paths {
            if path.exists() {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }

        debug!("No config file found in standard locations");
        None
    }

    /// Default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(paths::DIR_NAME).join(paths::FILE_NAME))
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` or `ConfigError::InvalidFormat`
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig =
            toml::from_str(&content).map_err(|source| ConfigError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Apply `SUCKSON_*` overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unparsable timeout
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to read variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unparsable timeout
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mirror) = lookup(env::MIRROR) {
            debug!("Mirror overridden by {}", env::MIRROR);
            self.set_mirror(mirror);
        }

        if let Some(raw) = lookup(env::FETCH_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: env::FETCH_TIMEOUT_SECS.to_string(),
                value: raw.clone(),
                reason: "expected a whole number of seconds".to_string(),
            })?;
            self.acquisition.timeout = Duration::from_secs(secs);
        }

        Ok(())
    }

    /// Replace the mirror prefix; a blank value clears it
    pub fn set_mirror(&mut self, mirror: impl Into<String>) {
        let mirror = mirror.into();
        self.acquisition.mirror = if mirror.trim().is_empty() {
            None
        } else {
            Some(mirror.trim().to_string())
        };
    }

    /// Reject values the fetcher cannot work with
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field
    pub fn validate(&self) -> ConfigResult<()> {
        if self.acquisition.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "acquisition.timeout".to_string(),
                value: "0s".to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }

        if self.acquisition.max_archive_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "acquisition.max_archive_bytes".to_string(),
                value: "0".to_string(),
                reason: "archive size limit must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Runtime configuration for the template fetcher
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            client: self.client.to_runtime_config(),
            timeout: self.acquisition.timeout,
            mirror: self.acquisition.mirror.clone(),
            max_archive_bytes: self.acquisition.max_archive_bytes,
            sources: self.templates.clone(),
        }
    }
}

//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument / process environment (merged by the caller's CLI parser)
//! 2. Env file (`DATABASE_URL=...` lines, `.env` by default)
//! 3. TOML config file (`songlib.toml` by default)
//! 4. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Env file looked up in the working directory when none is named
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Config file looked up in the working directory when none is named
pub const DEFAULT_CONFIG_FILE: &str = "songlib.toml";

/// Listen port used when no other source sets one
pub const DEFAULT_PORT: u16 = 8080;

/// Settings read from one config source; every field may be absent
///
/// As TOML:
/// ```toml
/// database_url = "sqlite://songs.db"
/// api_url = "https://example.com/api"
/// port = 8080
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    pub database_url: Option<String>,
    pub api_url: Option<String>,
    pub port: Option<u16>,
}

impl FileConfig {
    /// Read and parse a TOML config file
    pub fn load_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Read an env file of `KEY=value` lines
    ///
    /// Recognizes `DATABASE_URL`, `API_URL` and `SONGLIB_PORT`; other keys
    /// are ignored. The process environment is left untouched.
    pub fn load_env(path: &Path) -> Result<Self> {
        let read_error =
            |e: dotenvy::Error| Error::Config(format!("Failed to read env file {}: {}", path.display(), e));

        let mut config = Self::default();
        for item in dotenvy::from_path_iter(path).map_err(read_error)? {
            let (key, value) = item.map_err(read_error)?;
            match key.as_str() {
                "DATABASE_URL" => config.database_url = Some(value),
                "API_URL" => config.api_url = Some(value),
                "SONGLIB_PORT" => {
                    let port = value.parse().map_err(|_| {
                        Error::Config(format!(
                            "Invalid SONGLIB_PORT '{}' in env file {}",
                            value,
                            path.display()
                        ))
                    })?;
                    config.port = Some(port);
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Fill fields missing here from `fallback`
    pub fn or(self, fallback: FileConfig) -> Self {
        Self {
            database_url: self.database_url.or(fallback.database_url),
            api_url: self.api_url.or(fallback.api_url),
            port: self.port.or(fallback.port),
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub env_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub database_url: Option<String>,
    pub api_url: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// sqlx connection string for the songs store
    pub database_url: String,
    /// Base URL of the external song info API
    pub api_url: String,
    pub port: u16,
}

/// Load `named` if given (must be readable), else `default_name` if it exists
fn load_source(
    named: Option<&Path>,
    default_name: &str,
    load: fn(&Path) -> Result<FileConfig>,
) -> Result<FileConfig> {
    let path = match named {
        Some(path) => path,
        None => {
            let path = Path::new(default_name);
            if !path.exists() {
                return Ok(FileConfig::default());
            }
            path
        }
    };

    let config = load(path)?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

impl ServiceConfig {
    /// Resolve configuration from overrides, env file, TOML file and defaults
    ///
    /// An env or config file named explicitly must be readable. Unnamed
    /// ones (`.env`, `songlib.toml` in the working directory) are optional.
    /// Fails when no source provides a database URL.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let env_file = load_source(
            overrides.env_file.as_deref(),
            DEFAULT_ENV_FILE,
            FileConfig::load_env,
        )?;
        let toml_file = load_source(
            overrides.config_file.as_deref(),
            DEFAULT_CONFIG_FILE,
            FileConfig::load_toml,
        )?;

        Self::merge(overrides, env_file.or(toml_file))
    }

    /// Merge overrides over file values; no filesystem access
    pub fn merge(overrides: ConfigOverrides, file: FileConfig) -> Result<Self> {
        let database_url = overrides
            .database_url
            .or(file.database_url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "database URL not set (use --database-url, DATABASE_URL, a .env file or database_url in the config file)"
                        .to_string(),
                )
            })?;

        let api_url = overrides.api_url.or(file.api_url).unwrap_or_default();
        if api_url.is_empty() {
            warn!("API URL not configured");
        }

        let port = overrides.port.or(file.port).unwrap_or(DEFAULT_PORT);

        Ok(Self {
            database_url,
            api_url,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_priority_over_file() {
        let overrides = ConfigOverrides {
            database_url: Some("sqlite://cli.db".to_string()),
            port: Some(9000),
            ..Default::default()
        };
        let file = FileConfig {
            database_url: Some("sqlite://file.db".to_string()),
            api_url: Some("https://file.example".to_string()),
            port: Some(7000),
        };

        let config = ServiceConfig::merge(overrides, file).unwrap();
        assert_eq!(config.database_url, "sqlite://cli.db");
        assert_eq!(config.api_url, "https://file.example");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_first_source_wins_field_by_field() {
        let env = FileConfig {
            database_url: Some("sqlite://env.db".to_string()),
            ..Default::default()
        };
        let toml = FileConfig {
            database_url: Some("sqlite://toml.db".to_string()),
            api_url: Some("https://toml.example".to_string()),
            port: None,
        };

        let merged = env.or(toml);
        assert_eq!(merged.database_url.as_deref(), Some("sqlite://env.db"));
        assert_eq!(merged.api_url.as_deref(), Some("https://toml.example"));
        assert_eq!(merged.port, None);
    }

    #[test]
    fn test_defaults_apply() {
        let overrides = ConfigOverrides {
            database_url: Some("sqlite::memory:".to_string()),
            ..Default::default()
        };

        let config = ServiceConfig::merge(overrides, FileConfig::default()).unwrap();
        assert_eq!(config.api_url, "");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_missing_database_url_is_error() {
        let result = ServiceConfig::merge(ConfigOverrides::default(), FileConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_database_url_is_error() {
        let overrides = ConfigOverrides {
            database_url: Some(String::new()),
            ..Default::default()
        };
        let result = ServiceConfig::merge(overrides, FileConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }
}

//! Runtime configuration for sbom-meta.
//!
//! Two sources feed a run:
//! - database connection parameters from `CHAI_DB_*` environment variables,
//! - report preferences from an optional `sbom-meta.config.yml` file.
//!
//! Command-line flags override the file, which overrides built-in defaults.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::shared::error::SbomMetaError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "sbom-meta.config.yml";

pub const ENV_DB_HOST: &str = "CHAI_DB_HOST";
pub const ENV_DB_USER: &str = "CHAI_DB_USER";
pub const ENV_DB_PASSWORD: &str = "CHAI_DB_PASSWORD";
pub const ENV_DB_PORT: &str = "CHAI_DB_PORT";
pub const ENV_DB_NAME: &str = "CHAI_DB_NAME";

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "s3cr3t";
const DEFAULT_DB_PORT: u16 = 5435;
const DEFAULT_DB_NAME: &str = "chai";

/// Connection parameters for the CHAI metadata database.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub port: u16,
    pub dbname: String,
}

impl DatabaseConfig {
    /// Reads `CHAI_DB_*` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// Unset variables take their defaults. A set but malformed variable is a
    /// configuration error, never silently replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str, default: &str| -> Result<String> {
            match lookup(key) {
                None => Ok(default.to_string()),
                Some(value) if value.trim().is_empty() => Err(SbomMetaError::Configuration {
                    variable: key.to_string(),
                    details: "value must not be empty".to_string(),
                }
                .into()),
                Some(value) => Ok(value),
            }
        };

        let port = match lookup(ENV_DB_PORT) {
            None => DEFAULT_DB_PORT,
            Some(raw) => parse_port(&raw)?,
        };

        Ok(Self {
            host: non_empty(ENV_DB_HOST, DEFAULT_DB_HOST)?,
            user: non_empty(ENV_DB_USER, DEFAULT_DB_USER)?,
            password: lookup(ENV_DB_PASSWORD).unwrap_or_else(|| DEFAULT_DB_PASSWORD.to_string()),
            port,
            dbname: non_empty(ENV_DB_NAME, DEFAULT_DB_NAME)?,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    let port: u16 = raw
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| SbomMetaError::Configuration {
            variable: ENV_DB_PORT.to_string(),
            details: format!("'{}' is not a valid port: {}", raw, e),
        })?;

    if port == 0 {
        return Err(SbomMetaError::Configuration {
            variable: ENV_DB_PORT.to_string(),
            details: "port must be between 1 and 65535".to_string(),
        }
        .into());
    }

    Ok(port)
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
            port: DEFAULT_DB_PORT,
            dbname: DEFAULT_DB_NAME.to_string(),
        }
    }
}

// Keeps the password out of debug output.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .finish()
    }
}

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub sort: Option<String>,
    pub json: Option<bool>,
    pub full: Option<bool>,
    pub exclude_packages: Option<Vec<String>>,
    pub concurrency: Option<usize>,
    pub borders: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.is_file() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.concurrency == Some(0) {
        anyhow::bail!(
            "Invalid config: concurrency must be at least 1.\n\n\
             💡 Hint: Use 1 for sequential resolution or omit the field."
        );
    }

    if let Some(ref patterns) = config.exclude_packages {
        if let Some(i) = patterns.iter().position(|p| p.trim().is_empty()) {
            anyhow::bail!(
                "Invalid config: exclude_packages[{}] must not be empty.\n\n\
                 💡 Hint: Remove the blank entry or give it a pattern such as \"pytest-*\".",
                i
            );
        }
    }

    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}

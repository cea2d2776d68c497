//! Load `config.yml` and apply `BESTIARY_*` environment overrides.

use crate::config::types::*;
use crate::config::validator::{validate, Overrides};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Config file location: `BESTIARY_CONFIG`, else `config/config.yml`.
pub fn config_path() -> PathBuf {
    std::env::var(ENV_CONFIG_PATH)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load from `path`, overriding from the process environment.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    load_with_env(path, |key| std::env::var(key).ok())
}

/// Load from `path`, overriding through `env`. Empty environment values are ignored.
pub fn load_with_env<F>(path: &Path, env: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: FileConfig = if raw.trim().is_empty() {
        FileConfig::default()
    } else {
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };

    let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());
    let overrides = Overrides {
        database_url: lookup(ENV_DATABASE_URL),
        port: lookup(ENV_PORT),
    };
    validate(file, overrides)
}

//! Configuration file shape and the resolved settings.

use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.yml";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub const ENV_CONFIG_PATH: &str = "BESTIARY_CONFIG";
pub const ENV_DATABASE_URL: &str = "BESTIARY_DATABASE_URL";
pub const ENV_PORT: &str = "BESTIARY_PORT";

/// `config.yml` as written on disk. Every key is optional here; `validate` decides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub db_url: Option<String>,
    #[serde(default)]
    pub port: Option<PortSetting>,
    #[serde(default)]
    pub max_connections: Option<u32>,
}

/// `port: 8080` and `port: "8080"` are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortSetting {
    Number(u64),
    Text(String),
}

/// Settings the service runs with, after environment overrides and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
}

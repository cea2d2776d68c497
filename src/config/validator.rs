//! Turns a file config plus environment overrides into `AppConfig`.

use crate::config::types::*;
use crate::error::ConfigError;

/// Values taken from the environment. `None` leaves the file value in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_url: Option<String>,
    pub port: Option<String>,
}

pub fn validate(file: FileConfig, overrides: Overrides) -> Result<AppConfig, ConfigError> {
    let database_url = overrides
        .database_url
        .or(file.db_url)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::Missing("db_url"))?;

    let port = match overrides.port.map(PortSetting::Text).or(file.port) {
        None => DEFAULT_PORT,
        Some(PortSetting::Text(s)) if s.trim().is_empty() => DEFAULT_PORT,
        Some(setting) => parse_port(&setting)?,
    };

    let max_connections = file.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);
    if max_connections == 0 {
        return Err(ConfigError::Invalid {
            key: "max_connections",
            reason: "must be at least 1".into(),
        });
    }

    Ok(AppConfig {
        database_url,
        port,
        max_connections,
    })
}

fn parse_port(setting: &PortSetting) -> Result<u16, ConfigError> {
    let invalid = |value: String| ConfigError::Invalid {
        key: "port",
        reason: format!("{value:?} is not a port between 1 and 65535"),
    };
    let port = match setting {
        PortSetting::Number(n) => u16::try_from(*n).map_err(|_| invalid(n.to_string()))?,
        PortSetting::Text(s) => s.trim().parse::<u16>().map_err(|_| invalid(s.clone()))?,
    };
    if port == 0 {
        return Err(invalid("0".into()));
    }
    Ok(port)
}

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SYNCD_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("SYNCD_PORT") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "SYNCD_PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => 8868,
        };
        let db_path = lookup("SYNCD_DB_PATH")
            .unwrap_or_else(|| "syncd.db".into())
            .into();

        Ok(Self {
            host,
            port,
            db_path,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            key: "SYNCD_HOST",
            value: self.host.clone(),
            reason: e.to_string(),
        })
    }
}

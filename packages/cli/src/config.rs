use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

use todo_config::constants::*;
use todo_storage::StorageConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[source] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid value for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: IpAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub query_timeout: Duration,
    pub request_timeout: Duration,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var(PORT) {
            Ok(value) => value.parse::<u16>().map_err(ConfigError::InvalidPort)?,
            Err(_) => DEFAULT_PORT,
        };

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let host_str = env::var(HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let host = host_str
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_str.clone()))?;

        let database_url =
            env::var(DATABASE_URL).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let db_max_connections = positive_from_env(DB_MAX_CONNECTIONS, DEFAULT_DB_MAX_CONNECTIONS)?;
        let query_timeout_secs = positive_from_env(QUERY_TIMEOUT_SECS, DEFAULT_QUERY_TIMEOUT_SECS)?;
        let request_timeout_secs =
            positive_from_env(REQUEST_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS)?;

        let cors_origin =
            env::var(CORS_ORIGIN).unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Config {
            port,
            host,
            database_url,
            db_max_connections,
            query_timeout: Duration::from_secs(query_timeout_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            cors_origin,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            database_url: self.database_url.clone(),
            max_connections: self.db_max_connections,
            query_timeout: self.query_timeout,
            ..StorageConfig::default()
        }
    }
}

/// Read a strictly positive integer, falling back to `default` when unset
fn positive_from_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let value = match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw })?,
        Err(_) => default,
    };

    if value == T::default() {
        return Err(ConfigError::Zero(name));
    }

    Ok(value)
}

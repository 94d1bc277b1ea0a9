//! Service configuration, read from the environment (and `.env` via dotenv)

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct GuardConfig {
    pub bind_addr: SocketAddr,
    /// Request bodies larger than this are refused before parsing
    pub max_body_bytes: usize,
}

impl GuardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("GUARD_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let max_body_bytes = usize_or_default(
            "GUARD_MAX_BODY_BYTES",
            lookup("GUARD_MAX_BODY_BYTES"),
            DEFAULT_MAX_BODY_BYTES,
        );

        tracing::info!(%bind_addr, max_body_bytes, "Request guard configured");

        Ok(Self {
            bind_addr,
            max_body_bytes,
        })
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn usize_or_default(key: &str, raw: Option<String>, default: usize) -> usize {
    match raw {
        Some(raw) => match raw.parse::<usize>() {
            Ok(value) if value > 0 => value,
            _ => {
                tracing::warn!("Invalid value for {key} (`{raw}`), using default {default}");
                default
            }
        },
        None => default,
    }
}

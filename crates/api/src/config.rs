//! Process configuration, read once from the environment at startup.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOOKING_BIND_ADDR '{value}' is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("{key} must be 'true' or 'false', got '{value}'")]
    InvalidBool { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// HS256 secret for bearer/cookie tokens.
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    /// Directory served to page navigations that pass the route gate.
    pub static_dir: Option<PathBuf>,
    /// Populate the in-memory store with demo data on startup.
    pub seed_demo_data: bool,
}

impl ApiConfig {
    /// Defaults for everything but the secret.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            static_dir: None,
            seed_demo_data: false,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// Recognized keys: `JWT_SECRET`, `BOOKING_BIND_ADDR`,
    /// `BOOKING_STATIC_DIR`, `BOOKING_SEED`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            });

        let bind = lookup("BOOKING_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr { value: bind.clone(), source })?;

        let static_dir = lookup("BOOKING_STATIC_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let seed_demo_data = match lookup("BOOKING_SEED") {
            None => false,
            Some(value) => parse_bool("BOOKING_SEED", &value)?,
        };

        Ok(Self {
            jwt_secret,
            bind_addr,
            static_dir,
            seed_demo_data,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

//! Runtime configuration read from the environment

use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_STORAGE_ROOT: &str = "./storage";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Parent of the `uploads/` and `compressed/` directories
    pub storage_root: PathBuf,
    pub bind_address: SocketAddr,
    /// Prefix for download URLs handed back to clients
    pub public_base_url: String,
    /// Request body limit for uploads; `None` means unlimited
    pub max_upload_bytes: Option<usize>,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenv::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

        let storage_root = PathBuf::from(get("STORAGE_ROOT").unwrap_or(DEFAULT_STORAGE_ROOT));

        let bind_raw = get("BIND_ADDRESS").unwrap_or(DEFAULT_BIND_ADDRESS);
        let bind_address = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::InvalidValue {
            name: "BIND_ADDRESS",
            value: bind_raw.to_string(),
            reason: e.to_string(),
        })?;

        let public_base_url = get("PUBLIC_BASE_URL")
            .unwrap_or(DEFAULT_PUBLIC_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => Some(raw.parse::<usize>().map_err(|e| ConfigError::InvalidValue {
                name: "MAX_UPLOAD_BYTES",
                value: raw.to_string(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            storage_root,
            bind_address,
            public_base_url,
            max_upload_bytes,
        })
    }
}

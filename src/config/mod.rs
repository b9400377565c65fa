use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

pub mod swap;
pub use swap::SwapConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub log_json: bool,
    pub swap: SwapConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            swap: SwapConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Config {
            log_level: env::var("WALLET_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_json: env::var("WALLET_LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            swap: SwapConfig::from_env()?,
        })
    }

    /// [`Config::from_env`] with the failure mapped into the crate error type
    pub fn load() -> crate::error::Result<Self> {
        Self::from_env().map_err(|e| crate::error::WalletError::Configuration(e.to_string()))
    }
}

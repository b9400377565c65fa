use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

use crate::constants::{swap, tokens, watcher};

/// Configuration for the swap flows and the block watcher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapConfig {
    /// Slippage tolerance applied when the caller supplies none (default: 0.01)
    pub default_slippage: Decimal,

    /// Display symbol of the token DEX fees are paid in (default: DFI)
    pub fee_token_symbol: String,

    /// Display symbol of the stable loan token (default: DUSD)
    pub dusd_symbol: String,

    /// Interval in seconds between block height polls (default: 30)
    pub poll_interval_secs: u64,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            default_slippage: Decimal::new(swap::DEFAULT_SLIPPAGE_PERCENT, 2),
            fee_token_symbol: tokens::DFI_SYMBOL.to_string(),
            dusd_symbol: tokens::DUSD_SYMBOL.to_string(),
            poll_interval_secs: watcher::DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl SwapConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(val) = env::var("WALLET_DEFAULT_SLIPPAGE") {
            match Decimal::from_str(val.trim()) {
                Ok(slippage) if slippage >= Decimal::ZERO && slippage < Decimal::ONE => {
                    config.default_slippage = slippage;
                    info!("Using custom default slippage: {}", slippage);
                }
                Ok(_) => warn!(
                    "Invalid default slippage: {}, must be within [0, 1), using default",
                    val
                ),
                Err(_) => warn!("Failed to parse default slippage: {}, using default", val),
            }
        }

        if let Ok(val) = env::var("WALLET_FEE_TOKEN_SYMBOL") {
            let symbol = val.trim();
            if symbol.is_empty() {
                warn!("Empty fee token symbol, using default");
            } else {
                config.fee_token_symbol = symbol.to_string();
                info!("Using custom fee token symbol: {}", symbol);
            }
        }

        if let Ok(val) = env::var("WALLET_DUSD_SYMBOL") {
            let symbol = val.trim();
            if symbol.is_empty() {
                warn!("Empty DUSD symbol, using default");
            } else {
                config.dusd_symbol = symbol.to_string();
                info!("Using custom DUSD symbol: {}", symbol);
            }
        }

        if let Ok(val) = env::var("WALLET_POLL_INTERVAL_SECS") {
            match val.trim().parse::<u64>() {
                Ok(secs) if secs >= watcher::MIN_POLL_INTERVAL_SECS => {
                    config.poll_interval_secs = secs;
                    info!("Using custom block poll interval: {}s", secs);
                }
                Ok(_) => warn!(
                    "Invalid block poll interval: {}, must be >= {}, using default",
                    val,
                    watcher::MIN_POLL_INTERVAL_SECS
                ),
                Err(_) => warn!("Failed to parse block poll interval: {}, using default", val),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that would make the swap flows misbehave
    pub fn validate(&self) -> Result<()> {
        if self.default_slippage < Decimal::ZERO || self.default_slippage >= Decimal::ONE {
            return Err(anyhow!(
                "Default slippage {} must be within [0, 1)",
                self.default_slippage
            ));
        }

        if self.fee_token_symbol.is_empty() {
            return Err(anyhow!("Fee token symbol cannot be empty"));
        }

        if self.poll_interval_secs < watcher::MIN_POLL_INTERVAL_SECS {
            return Err(anyhow!(
                "Block poll interval must be at least {} second",
                watcher::MIN_POLL_INTERVAL_SECS
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SwapConfig::default();
        assert_eq!(config.default_slippage, Decimal::from_str("0.01").unwrap());
        assert_eq!(config.fee_token_symbol, "DFI");
        assert_eq!(config.dusd_symbol, "DUSD");
        assert_eq!(config.poll_interval_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("WALLET_DEFAULT_SLIPPAGE", "0.03");
        env::set_var("WALLET_POLL_INTERVAL_SECS", "not-a-number");

        let config = SwapConfig::from_env().expect("Failed to load config from env");

        assert_eq!(config.default_slippage, Decimal::from_str("0.03").unwrap());
        // Unparseable values fall back to the default
        assert_eq!(config.poll_interval_secs, 30);

        env::remove_var("WALLET_DEFAULT_SLIPPAGE");
        env::remove_var("WALLET_POLL_INTERVAL_SECS");
    }

    #[test]
    fn test_validation_rejects_full_slippage() {
        let config = SwapConfig {
            default_slippage: Decimal::ONE,
            ..SwapConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SwapConfig {
            poll_interval_secs: 0,
            ..SwapConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

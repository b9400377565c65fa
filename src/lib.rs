pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{Config, SwapConfig};
pub use error::{ErrorCode, Result, WalletError};

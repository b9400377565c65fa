//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Default directive when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "wallet_swap_core=info";

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl LogFormat {
    pub fn from_config(config: &Config) -> Self {
        if config.log_json {
            LogFormat::Json
        } else {
            LogFormat::Plain
        }
    }
}

fn filter_directive(level: Option<&str>) -> String {
    match level {
        Some(level) if !level.trim().is_empty() => format!("wallet_swap_core={}", level.trim()),
        _ => DEFAULT_FILTER.to_string(),
    }
}

fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(level)))
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `level`; `level` wins over [`DEFAULT_FILTER`]. Calling
/// this more than once is harmless: later calls leave the first subscriber in place.
pub fn init_tracing(level: Option<&str>) {
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter(level)).try_init();
}

/// Same as [`init_tracing`] but emits JSON lines.
pub fn init_json_tracing(level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(level))
        .try_init();
}

/// Install the subscriber described by `log_level` and `log_json`
pub fn init_from_config(config: &Config) -> LogFormat {
    let format = LogFormat::from_config(config);
    match format {
        LogFormat::Plain => init_tracing(Some(config.log_level.as_str())),
        LogFormat::Json => init_json_tracing(Some(config.log_level.as_str())),
    }
    format
}

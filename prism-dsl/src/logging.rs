//! Tracing subscriber setup for applications embedding the builder

use crate::config::LoggingConfig;
use crate::error::Result;
use crate::value::vocabulary;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

vocabulary! {
    /// Log output format
    pub enum LogFormat ("log format") {
        Pretty => "pretty",
        Json => "json",
    }
}

impl LoggingConfig {
    pub fn log_format(&self) -> Result<LogFormat> {
        self.format.parse()
    }
}

/// Install a global subscriber. RUST_LOG wins over the configured level.
///
/// Returns `Ok(false)` when another subscriber was already installed.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.log_format()? {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .is_ok(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::debug!(level = %config.level, format = %config.format, "logging initialized");
    }
    Ok(installed)
}

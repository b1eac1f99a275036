//! Logging setup for the demo binary.
//!
//! Single-stream `tracing` with component targets for filtering:
//!
//! | Target | Description |
//! |--------|-------------|
//! | `alpha_weather::engine` | Engine lifecycle and transitions |
//! | `alpha_weather::regime` | Regime state machine decisions |
//! | `alpha_weather::pulse` | Micro-pulse spawns and sweeps |
//!
//! ```bash
//! # Debug only the pulse subsystem
//! RUST_LOG=warn,alpha_weather::pulse=debug cargo run --bin dashboard
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable format (default for the demo)
    #[default]
    Pretty,
    /// JSON format (for log aggregation)
    Json,
    /// Compact single-line format
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Default level when RUST_LOG is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Install the global subscriber. RUST_LOG overrides the configured level.
/// Call once at startup; a second call is rejected by the subscriber and
/// reported as an error.
pub fn init_logging(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.format {
        LogFormat::Pretty => builder.pretty().try_init()?,
        LogFormat::Json => builder.json().try_init()?,
        LogFormat::Compact => builder.compact().try_init()?,
    }
    Ok(())
}

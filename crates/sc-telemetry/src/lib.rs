//! # Shard-Chain Telemetry
//!
//! Logging and metrics setup shared by every node binary and test harness.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sc_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let handle = init_telemetry(&TelemetryConfig::from_env())?;
//! let body = handle.render()?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SC_SERVICE_NAME` | `shard-chain` | Service name in logs and metrics |
//! | `SC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SC_JSON_LOGS` | `false` | JSON log lines |
//! | `SC_METRICS_PORT` | `9100` | Prometheus exporter port |

#![warn(missing_docs)]

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{encode_metrics, register_metrics, MetricsHandle, BUILD_INFO};
pub use tracing_setup::{env_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing: {0}")]
    TracingInit(String),

    /// Metrics could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// A setting does not parse.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Installs logging and registers node metrics.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<MetricsHandle, TelemetryError> {
    init_tracing(config)?;
    Ok(register_metrics(config))
}

/// Span carrying the shard a piece of work belongs to.
///
/// ```rust,ignore
/// let _span = shard_span!("intercept", shard = 2, topic = "transactions_2").entered();
/// ```
#[macro_export]
macro_rules! shard_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

//! # C3 Telemetry
//!
//! Structured logging and Prometheus metrics for the C3 multi-chain layer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use c3_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `C3_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `C3_JSON_LOGS` | `false` | JSON formatted logs |
//! | `C3_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `C3_SERVICE_NAME` | `c3-multichain` | Service name in logs |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, DISPATCH_DURATION, PARTITION_DISPATCHES,
    POLL_ROUNDS, STATUS_QUERIES, TRANSFERS_SUBMITTED,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed.
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and register metrics.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_logging(config)?;
    register_metrics()?;
    Ok(())
}

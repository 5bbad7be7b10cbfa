//! Tracing subscriber setup for hosts embedding the pipeline.

use crate::error::TelemetryError;
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Install a global `fmt` subscriber
///
/// `RUST_LOG` wins over `default_directive` when set.
///
/// # Errors
/// [`TelemetryError`] if a global subscriber is already installed.
pub fn init_tracing(default_directive: &str, format: LogFormat) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let installed = match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };

    installed.map_err(|e| TelemetryError(e.to_string()))
}

//! Tracing subscriber setup for hosts embedding the election core.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogFormat;

/// Failure to install the global tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tracing init failed: {message}")]
pub struct TelemetryError {
    message: String,
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns an error instead of panicking when a global subscriber is already
/// installed, so hosts and tests may call it more than once.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the subscriber cannot be installed.
pub fn init_tracing(format: LogFormat) -> Result<(), TelemetryError> {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.map_err(|err| TelemetryError {
        message: err.to_string(),
    })
}

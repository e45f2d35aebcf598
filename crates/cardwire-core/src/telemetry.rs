//! Tracing subscriber bootstrap.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{CoreError, CoreResult};

/// Installs the global tracing subscriber.
///
/// ## Summary
/// Builds an `EnvFilter` from the configured level and a `fmt` layer with
/// target, file and line information. An unparseable level falls back to
/// `debug`.
///
/// ## Errors
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing(config: &LoggingConfig) -> CoreResult<()> {
    let (filter, invalid_level) = match EnvFilter::try_new(config.level.as_str()) {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new("debug"), true),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| CoreError::TelemetryError(e.to_string()))?;

    if invalid_level {
        tracing::warn!(level = %config.level, "Invalid log level in config, using debug");
    }

    Ok(())
}

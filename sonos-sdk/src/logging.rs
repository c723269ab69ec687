//! Logging setup for remotes built on this crate
//!
//! Libraries in this workspace only emit `tracing` events; binaries pick how
//! (and whether) those are printed by calling one of these initializers.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No output
    Silent,
    /// Compact stderr output
    Development,
    /// Verbose diagnostics with source locations
    Debug,
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}

/// Initialize logging with the specified mode
///
/// # Environment Variables
///
/// - `SONOS_LOG_LEVEL`: filter directive (e.g. `debug`, `sonos_discovery=trace`)
/// - `RUST_LOG`: used when `SONOS_LOG_LEVEL` is unset
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let filter = create_env_filter("info")?;

            Registry::default()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_file(false)
                        .with_line_number(false)
                        .compact(),
                )
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let filter = create_env_filter("debug")?;

            Registry::default()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .pretty()
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

/// Parse a `SONOS_LOG_MODE` value; anything unrecognized is silent
pub fn mode_from_str(value: &str) -> LoggingMode {
    match value.trim().to_ascii_lowercase().as_str() {
        "development" | "dev" => LoggingMode::Development,
        "debug" => LoggingMode::Debug,
        _ => LoggingMode::Silent,
    }
}

/// Initialize logging from the `SONOS_LOG_MODE` environment variable
///
/// Defaults to `fallback` if the variable is unset.
pub fn init_logging_from_env(fallback: LoggingMode) -> Result<(), LoggingError> {
    let mode = std::env::var("SONOS_LOG_MODE")
        .map(|v| mode_from_str(&v))
        .unwrap_or(fallback);
    init_logging(mode)
}

/// Create an environment filter with fallback to default level
fn create_env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    // First try SONOS_LOG_LEVEL, then RUST_LOG, then default
    let directive = std::env::var("SONOS_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_level.to_string());

    EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter(format!("{}: {}", directive, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_mode() {
        assert!(init_logging(LoggingMode::Silent).is_ok());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(mode_from_str("development"), LoggingMode::Development);
        assert_eq!(mode_from_str(" Debug "), LoggingMode::Debug);
        assert_eq!(mode_from_str("silent"), LoggingMode::Silent);
        assert_eq!(mode_from_str("loud"), LoggingMode::Silent);
    }
}

//! Structured logging setup.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Maps user-facing level names onto `tracing` filter directives.
#[must_use]
pub fn normalize_log_level(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

fn build_log_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("{level},contentboard={level}"))
}

/// Installs a stderr subscriber filtered at `level`.
///
/// # Errors
///
/// Returns [`LoggingError::Install`] when a global subscriber is already set.
pub fn init_logging(level: &str) -> Result<(), LoggingError> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_log_filter(level))
        .with(layer)
        .try_init()?;

    tracing::debug!(level, "logging initialized");
    Ok(())
}

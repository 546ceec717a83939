//! Log subscriber setup for binaries and examples

use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directive when `RUST_LOG` is unset or unparsable
pub const DEFAULT_LOG_DIRECTIVE: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Plain,
    /// One JSON object per event
    Json,
}

#[derive(Error, Debug)]
pub enum LoggingInitError {
    #[error("Global subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Install the global subscriber. Filtering comes from `RUST_LOG`.
///
/// A second call fails without replacing the first subscriber.
pub fn init_logging(format: LogFormat) -> Result<(), LoggingInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    let result = match format {
        LogFormat::Plain => fmt().with_env_filter(filter).with_target(true).try_init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init(),
    };

    result.map_err(|e| LoggingInitError::AlreadyInstalled(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // Another test may have installed a subscriber first; either way the
        // follow-up call must fail.
        let _ = init_logging(LogFormat::Plain);
        assert!(matches!(
            init_logging(LogFormat::Json),
            Err(LoggingInitError::AlreadyInstalled(_))
        ));
    }
}

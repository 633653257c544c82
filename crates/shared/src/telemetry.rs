//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;
use crate::error::{AppError, AppResult};

/// `RUST_LOG` when set and valid, otherwise the configured filter.
#[must_use]
pub fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter))
}

/// Installs the global subscriber: human-readable or JSON lines.
///
/// # Errors
///
/// Returns `AppError::Internal` if a global subscriber is already set.
pub fn init_tracing(settings: &LoggingSettings) -> AppResult<()> {
    let registry = tracing_subscriber::registry().with(env_filter(settings));
    let installed = if settings.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    installed.map_err(|err| AppError::Internal(format!("Failed to install tracing: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(filter: &str) -> LoggingSettings {
        LoggingSettings {
            filter: filter.to_string(),
            json: false,
        }
    }

    #[test]
    fn test_filter_from_settings() {
        temp_env::with_var_unset("RUST_LOG", || {
            assert_eq!(env_filter(&settings("debug")).to_string(), "debug");
        });
    }

    #[test]
    fn test_rust_log_takes_precedence() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            assert_eq!(env_filter(&settings("debug")).to_string(), "warn");
        });
    }

    #[test]
    fn test_second_init_is_an_error() {
        temp_env::with_var_unset("RUST_LOG", || {
            let first = init_tracing(&settings("info"));
            let second = init_tracing(&settings("info"));
            assert!(first.is_ok());
            assert!(matches!(second, Err(AppError::Internal(_))));
        });
    }
}

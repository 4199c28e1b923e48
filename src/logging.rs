//! Tracing setup.
//!
//! Logs go to stderr so `acca fit --json` stays machine-readable. The filter
//! comes from `ACCA_LOG` (e.g. `ACCA_LOG=acca_regression=debug`).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{AppError, EXIT_RUNTIME, EXIT_USAGE};

const FILTER_ENV: &str = "ACCA_LOG";
const DEFAULT_FILTER: &str = "acca_regression=warn";

/// Initialises tracing.
pub fn init() -> Result<(), AppError> {
    let filter = env_filter(std::env::var(FILTER_ENV).ok().as_deref())?;

    let format_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(format_layer)
        .try_init()
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialise logging: {e}")))
}

/// Parse `directives`, falling back to the default filter when unset or blank.
fn env_filter(directives: Option<&str>) -> Result<EnvFilter, AppError> {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => EnvFilter::try_new(d)
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Invalid {FILTER_ENV} filter '{d}': {e}"))),
        None => EnvFilter::try_new(DEFAULT_FILTER)
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Invalid default log filter: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_blank_uses_default() {
        assert!(env_filter(None).is_ok());
        assert!(env_filter(Some("  ")).is_ok());
    }

    #[test]
    fn valid_directives_are_used() {
        assert!(env_filter(Some("acca_regression=debug")).is_ok());
        assert!(env_filter(Some("warn,acca_regression=trace")).is_ok());
    }

    #[test]
    fn invalid_directives_are_reported() {
        let err = env_filter(Some("acca_regression=loud")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE);
        assert!(err.to_string().contains("Invalid ACCA_LOG filter"));
    }
}

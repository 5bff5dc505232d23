//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured filter. Installing a
//! second global subscriber returns an error instead of panicking, so tests
//! and embedding hosts can call [`init_tracing`] freely.

use roster_domain::{LoggingConfig, Result, RosterError};
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber described by `config`.
///
/// # Errors
/// Returns `RosterError::Config` if the filter directive does not parse or a
/// global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(|e| RosterError::Config(format!("tracing already initialized: {e}")))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            RosterError::Config(format!("Invalid log filter {:?}: {e}", config.filter))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let config = LoggingConfig::default();
        let first = init_tracing(&config);
        let second = init_tracing(&config);
        // another test may have installed a subscriber first
        assert!(first.is_ok() || second.is_err());
        assert!(second.is_err());
    }

    #[test]
    fn test_invalid_filter_is_config_error() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig { filter: "roster_core=loud".to_string(), json: false };
        assert!(matches!(build_filter(&config), Err(RosterError::Config(_))));
    }
}

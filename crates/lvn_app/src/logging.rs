//! Tracing setup

use tracing_subscriber::EnvFilter;

use crate::config::SessionConfig;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to the
/// config's `log_filter`
///
/// Returns `false` when a global subscriber was already installed, in which
/// case nothing changes.
pub fn init_tracing(config: &SessionConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        let config = SessionConfig::default();
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}

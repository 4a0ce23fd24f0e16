//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` wins, then `--verbose`, then the configured level.
///
/// The level applies to this crate and to the HTTP request spans from
/// `tower_http`; everything else stays at `warn`.
fn build_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { config.level.as_str() };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={level},tower_http={level},warn",
            env!("CARGO_CRATE_NAME")
        ))
    })
}

/// Install the global tracing subscriber. Logs go to stderr.
pub fn init_tracing(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = build_filter(config, verbose);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize tracing: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_configured_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig::default();
        let filter = build_filter(&config, true).to_string().to_lowercase();
        assert!(filter.contains("weathernow=debug"), "{filter}");
        assert!(filter.contains("tower_http=debug"), "{filter}");

        let filter = build_filter(&config, false).to_string().to_lowercase();
        assert!(filter.contains("weathernow=info"), "{filter}");
        assert!(filter.contains("tower_http=info"), "{filter}");
    }
}

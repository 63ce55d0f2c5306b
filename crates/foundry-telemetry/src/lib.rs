//! Logging setup for the Foundry bridge
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! human readable or a JSON formatting layer. Log lines go to stderr so that
//! command output on stdout stays clean.

use foundry_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither the caller nor the config supplies one
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the global subscriber
///
/// `log_filter` takes precedence over the configured filter. An invalid
/// directive falls back to [`DEFAULT_FILTER`] instead of failing startup.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, log_filter: Option<&str>) -> anyhow::Result<()> {
    let directive = resolve_filter(config, log_filter);
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let format = config.map(|c| c.format).unwrap_or_default();

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

fn resolve_filter<'a>(config: Option<&'a TelemetryConfig>, log_filter: Option<&'a str>) -> &'a str {
    log_filter
        .filter(|f| !f.trim().is_empty())
        .or_else(|| config.map(|c| c.filter.as_str()))
        .unwrap_or(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let config = TelemetryConfig {
            filter: "warn".to_owned(),
            format: LogFormat::Json,
        };

        assert_eq!(resolve_filter(Some(&config), Some("debug")), "debug");
        assert_eq!(resolve_filter(Some(&config), Some("  ")), "warn");
        assert_eq!(resolve_filter(Some(&config), None), "warn");
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
    }

    #[test]
    fn second_init_reports_error() {
        init(None, Some("off")).unwrap();
        assert!(init(None, Some("off")).is_err());
    }
}

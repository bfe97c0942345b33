//! Tracing subscriber setup. Logs go to stderr so stdout stays clean for
//! the form output.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Filter directive for the given `-v` count, falling back to the
/// configured level.
fn directive(config: &LoggingConfig, verbose: u8) -> &str {
    match verbose {
        0 => &config.level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over both
/// `-v` and the configured level.
pub fn init(config: &LoggingConfig, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(config, verbose)));

    let fmt_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
    {
        eprintln!("logging already initialized: {err}");
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_overrides_config_level() {
        let config = LoggingConfig::default();
        assert_eq!(directive(&config, 0), "warn");
        assert_eq!(directive(&config, 1), "info");
        assert_eq!(directive(&config, 2), "debug");
        assert_eq!(directive(&config, 5), "trace");
    }
}

//! Tracing Setup
//!
//! Installs a `tracing-subscriber` fmt subscriber. `RUST_LOG` wins over the
//! configured level.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cap_engine::config::load_config;
//! use cap_engine::telemetry::init_telemetry;
//!
//! let config = load_config(None)?;
//! init_telemetry(&config.observability.logging);
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_telemetry(config: &LoggingConfig) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let installed = if config.format == "pretty" {
        builder.pretty().try_init().is_ok()
    } else if config.include_spans {
        builder.json().with_current_span(true).try_init().is_ok()
    } else {
        builder
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::debug!(level = %config.level, format = %config.format, "Logging initialized");
    }
    installed
}

//! Logging Setup
//!
//! Installs the global tracing subscriber. `RUST_LOG` takes precedence over
//! the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` if set, else `seastate=<level>`
pub fn env_filter(config: &LoggingConfig, extra: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = format!("seastate={}", config.level);
        if !extra.is_empty() {
            directives.push(',');
            directives.push_str(extra);
        }
        EnvFilter::new(directives)
    })
}

/// Initialize logging in `pretty` or `json` format
///
/// `extra` adds filter directives for other crates, e.g. `tower_http=debug`.
pub fn init(config: &LoggingConfig, extra: &str) {
    let filter = env_filter(config, extra);

    let result = if config.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    };

    if let Err(e) = result {
        // A subscriber is already installed (e.g. by a test harness).
        tracing::debug!("Logging already initialized: {}", e);
    }
}

//! Telemetry setup
//!
//! Structured logging with tracing and tracing-subscriber.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Build the filter used when `RUST_LOG` is not set
fn default_filter(level: &str) -> String {
    format!("portfolio_qa={level},tower_http={level}")
}

/// Initialize the tracing subscriber
///
/// Only the first call per process has any effect. `RUST_LOG` takes
/// precedence over `default_level`.
///
/// ```no_run
/// portfolio_qa::telemetry::init("info");
/// tracing::info!("Application started");
/// ```
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

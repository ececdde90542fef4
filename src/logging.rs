//! Logging setup for Strongroom
//!
//! The embedding binary calls [`init`] once at startup; `RUST_LOG` takes
//! precedence over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("strongroom={log_level},info").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! Tracing initialization for embedding hosts.
//!
//! The engine itself only emits `tracing` events; the host that embeds
//! it calls [`init`] once at startup to install a subscriber.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;

/// Initializes the global tracing subscriber.
///
/// An explicit `RUST_LOG` environment filter takes precedence over the
/// configured directive.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init(config: &LogConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! Logging - tracing subscriber setup and the tracing-backed `Logger`

use tracing_subscriber::EnvFilter;

use crate::domain::traits::Logger;

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests, repeated CLI calls) is not an error
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}

/// `Logger` that forwards to `tracing`
#[derive(Debug, Default, Clone)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn custom(&self, tag: &str, message: &str) {
        tracing::info!(tag = %tag, "{}", message);
    }

    fn section(&self, title: &str) {
        tracing::info!("==================== {} ====================", title);
    }
}

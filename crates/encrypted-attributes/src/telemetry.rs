//! Tracing subscriber setup for host applications.
//!
//! Structured JSON logs only. The interceptor never logs attribute values,
//! so no PII or key material reaches the output.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber at `log_level`.
///
/// `RUST_LOG`, when set, takes precedence.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

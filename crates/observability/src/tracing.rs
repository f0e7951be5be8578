//! Tracing/logging initialization.
//!
//! The domain crates emit nothing themselves; operation-level events come
//! from the `shiptrack-app` facade and are formatted here.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset: everything at info, plus the
/// facade's own events (parcel mutations, authorization denials) at debug.
const DEFAULT_FILTER: &str = "info,shiptrack_app=debug";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops), so binaries
/// and integration tests can both call it unconditionally.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Flattened JSON lines, one event per line, overridable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        tracing::info!("still alive after double init");
    }
}

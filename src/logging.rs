//! Logging setup helpers
//!
//! The SDK logs through `tracing`. Hosts that already install their own
//! subscriber can ignore this module entirely; these helpers exist for
//! applications that want the SDK's logs with one call.

use tracing_subscriber::EnvFilter;

/// Initialize a stderr subscriber.
///
/// `debug` selects the default filter level, matching the configuration's
/// debug flag; the `RUST_LOG` environment variable takes precedence when
/// set. Does nothing if a global subscriber is already installed.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize logging for tests (logs to the test writer)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

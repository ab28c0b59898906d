//! Installation-identifying configuration
//!
//! A [`Config`] is handed to [`Coordinator::initialize`] once per
//! coordinator, early, before any other operation; later calls are no-ops.
//!
//! [`Coordinator::initialize`]: crate::Coordinator::initialize

use crate::types::Environment;

/// Immutable installation configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application identifier assigned by the service
    pub application_id: i64,
    /// Shared secret used to sign API requests
    pub secret: String,
    /// Environment to register clients against
    pub environment: Environment,
    /// Enables verbose SDK logging
    pub debug: bool,
}

impl Config {
    /// Create a configuration with debug logging disabled.
    pub fn new(application_id: i64, secret: impl Into<String>, environment: Environment) -> Self {
        Self {
            application_id,
            secret: secret.into(),
            environment,
            debug: false,
        }
    }

    /// Set the debug flag.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new(42, "secret", Environment::Production);
        assert_eq!(config.application_id, 42);
        assert_eq!(config.secret, "secret");
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.debug);
    }

    #[test]
    fn test_config_with_debug() {
        let config = Config::new(42, "secret", Environment::Development).with_debug(true);
        assert!(config.debug);
    }
}

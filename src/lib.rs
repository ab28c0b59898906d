//! # pushline
//!
//! Client SDK for the Pushline push notification and analytics service.
//!
//! This library provides:
//! - Device registration against the Pushline API, with the cached
//!   registration reused when it still applies
//! - Fire-and-forget event and tag reporting, gated on registration
//! - A local SQLite cache of the client record and confirmed tag values
//!
//! ## Architecture
//!
//! Registration is a one-time decision guarded by a [`RegistrationGate`]:
//! every reporting call suspends on the gate until a client is registered,
//! then proceeds. Reporting is fire and forget; a failed send is logged and
//! dropped, never retried and never surfaced to the calling code.
//!
//! The [`Coordinator`] is constructed with its collaborators (remote API,
//! store, token provider, device profile) in the application's composition
//! root, then configured once with [`Coordinator::initialize`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use pushline::{Config, Environment, Store};
//!
//! // Open the local store
//! let store = Store::open(Path::new("pushline.db")).expect("failed to open store");
//! store.migrate().expect("failed to run migrations");
//!
//! // Installation credentials from the Pushline dashboard
//! let config = Config::new(42, "secret", Environment::Production);
//! ```

// Re-export commonly used items at the crate root
pub use api::{HttpApi, RemoteApi, BASE_URL};
pub use config::Config;
pub use coordinator::Coordinator;
pub use device::DeviceProfile;
pub use error::{Error, Result};
pub use gate::RegistrationGate;
pub use store::Store;
pub use token::TokenProvider;
pub use types::*;

// Public modules
pub mod api;
pub mod config;
pub mod coordinator;
pub mod device;
pub mod error;
pub mod gate;
pub mod logging;
pub mod store;
pub mod token;
pub mod types;

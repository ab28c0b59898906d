//! Coordinator: the SDK facade
//!
//! Orchestrates registration and the fire-and-forget reporting operations
//! against the remote API, the local store, and the registration gate.
//!
//! ## Concurrency
//!
//! Every mutating operation spawns an independent task onto the ambient
//! Tokio runtime; the facade never blocks its caller beyond the synchronous
//! tag short-circuit check. Reporting tasks suspend in exactly one place,
//! the registration gate, and proceed in no particular order once it opens.
//!
//! Transport failures are logged and the operation dropped. Nothing is
//! retried and no failure propagates back across the async boundary to the
//! method that triggered it. In particular, a failed client creation leaves
//! the gate unresolved: reporting tasks stay suspended until a later
//! registration attempt succeeds, or forever if none does.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::api::RemoteApi;
use crate::config::Config;
use crate::device::DeviceProfile;
use crate::error::{Error, Result};
use crate::gate::RegistrationGate;
use crate::store::Store;
use crate::token::TokenProvider;
use crate::types::Client;

/// Entry point for the Pushline SDK.
///
/// Construct one per process in the application's composition root and hand
/// out clones; all clones share the same underlying state. Methods that
/// spawn background work must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

struct Inner {
    config: RwLock<Option<Config>>,
    gate: RegistrationGate,
    api: Arc<dyn RemoteApi>,
    store: Arc<Store>,
    tokens: Arc<dyn TokenProvider>,
    device: DeviceProfile,
}

impl Inner {
    fn config(&self) -> Result<Config> {
        self.config
            .read()
            .unwrap()
            .clone()
            .ok_or(Error::Uninitialized)
    }

    /// Reuse-or-create decision for the supplied token.
    fn register_client(self: &Arc<Self>, config: Config, token: Option<String>) {
        // Reuse branch: a cached registration for the same application whose
        // token is unknown or unchanged opens the gate with no network call.
        match self.store.get_client() {
            Ok(Some(cached))
                if cached.application_id == config.application_id
                    && token_matches(cached.token.as_deref(), token.as_deref()) =>
            {
                info!(client_id = cached.id, "reusing cached client registration");
                self.gate.resolve(cached);
                return;
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "failed to read cached client, registering anew"),
        }

        info!(
            application_id = config.application_id,
            environment = %config.environment,
            "registering client"
        );

        let inner = self.clone();
        tokio::spawn(async move {
            match inner
                .api
                .create_client(
                    token.as_deref(),
                    config.application_id,
                    &config.secret,
                    config.environment,
                )
                .await
            {
                Ok(client) => {
                    info!(client_id = client.id, "client registered");
                    info!(
                        "see https://app.pushline.io/applications/{}/clients to verify the registration",
                        config.application_id
                    );
                    if let Err(e) = inner.store.put_client(&client) {
                        warn!(error = %e, "failed to persist client registration");
                    }
                    inner.gate.resolve(client);
                }
                Err(e) => {
                    // The gate stays unresolved; operations already waiting
                    // remain suspended until a later attempt succeeds.
                    warn!(error = %e, "client registration failed");
                }
            }
        });
    }
}

impl Coordinator {
    /// Creates a coordinator wired to its collaborators.
    pub fn new(
        api: Arc<dyn RemoteApi>,
        store: Arc<Store>,
        tokens: Arc<dyn TokenProvider>,
        device: DeviceProfile,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config: RwLock::new(None),
                gate: RegistrationGate::new(),
                api,
                store,
                tokens,
                device,
            }),
        }
    }

    /// Stores the configuration.
    ///
    /// The first call wins; later calls are no-ops. Call once, early,
    /// before any other operation.
    pub fn initialize(&self, config: Config) {
        let mut guard = self.inner.config.write().unwrap();
        if guard.is_some() {
            return;
        }
        *guard = Some(config);
    }

    /// Application id from the stored configuration.
    pub fn application_id(&self) -> Option<i64> {
        self.inner
            .config
            .read()
            .unwrap()
            .as_ref()
            .map(|c| c.application_id)
    }

    /// Shared secret from the stored configuration.
    pub fn secret(&self) -> Option<String> {
        self.inner
            .config
            .read()
            .unwrap()
            .as_ref()
            .map(|c| c.secret.clone())
    }

    /// The currently registered client, once registration has completed.
    pub fn current_client(&self) -> Option<Arc<Client>> {
        self.inner.gate.current()
    }

    /// Starts registration: obtains a push token, then registers the client.
    ///
    /// The work runs in a background task. A failed token fetch is logged
    /// and the attempt abandoned without resolving the gate.
    pub fn register(&self, sender_id: impl Into<String>) -> Result<()> {
        let config = self.inner.config()?;
        let sender_id = sender_id.into();

        let inner = self.inner.clone();
        tokio::spawn(async move {
            match inner.tokens.obtain_token(&sender_id).await {
                Ok(token) => inner.register_client(config, Some(token)),
                Err(e) => {
                    warn!(error = %e, "token fetch failed, abandoning registration");
                }
            }
        });
        Ok(())
    }

    /// Registers a client for the supplied token, reusing the cached
    /// registration when it still applies.
    ///
    /// A `None` token counts as unknown and matches any cached one.
    pub fn register_client(&self, token: Option<String>) -> Result<()> {
        let config = self.inner.config()?;
        self.inner.register_client(config, token);
        Ok(())
    }

    /// Reports an event for this client.
    ///
    /// Fire and forget: the send waits for registration to complete, and a
    /// failed send is logged and dropped.
    pub fn track_event(&self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();

        let inner = self.inner.clone();
        tokio::spawn(async move {
            let client = inner.gate.resolved().await;
            let config = match inner.config() {
                Ok(config) => config,
                // The gate cannot resolve without a configuration.
                Err(_) => return,
            };

            info!(name = %name, "sending event");
            match inner
                .api
                .post_event(&client, &config.secret, &name, value.as_deref())
                .await
            {
                Ok(event) => {
                    info!(name = %event.name, timestamp = %event.timestamp, "event sent");
                }
                Err(e) => warn!(name = %name, error = %e, "sending event failed, dropping it"),
            }
        });
    }

    /// Sets a tag on this client.
    ///
    /// Returns immediately without any network activity when the last
    /// confirmed value matches case-insensitively. Otherwise the send waits
    /// for registration; the new value is persisted only after the server
    /// confirms it, and a failed send is logged and dropped.
    pub fn set_tag(&self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();

        // Short-circuit: unchanged values are not resent.
        match self.inner.store.get_tag(&name) {
            Ok(Some(cached)) if cached.same_value(value.as_deref()) => return,
            Ok(_) => {}
            Err(e) => warn!(name = %name, error = %e, "failed to read cached tag"),
        }

        let inner = self.inner.clone();
        tokio::spawn(async move {
            let client = inner.gate.resolved().await;
            let config = match inner.config() {
                Ok(config) => config,
                Err(_) => return,
            };

            info!(name = %name, value = ?value, "sending tag");
            match inner
                .api
                .set_tag(&client, &config.secret, &name, value.as_deref())
                .await
            {
                Ok(tag) => {
                    info!(name = %tag.name, "tag sent");
                    if let Err(e) = inner.store.put_tag(&tag) {
                        warn!(name = %tag.name, error = %e, "failed to persist tag");
                    }
                }
                Err(e) => warn!(name = %name, error = %e, "sending tag failed, dropping it"),
            }
        });
    }

    /// Reports the fixed device metadata tags.
    ///
    /// Each tag follows its own independent short-circuit and async path.
    pub fn set_device_tags(&self) -> Result<()> {
        self.inner.config()?;
        for (name, value) in self.inner.device.tags() {
            self.set_tag(name, Some(value.to_string()));
        }
        Ok(())
    }
}

/// A token matches when either side is unknown or the strings are equal.
fn token_matches(stored: Option<&str>, incoming: Option<&str>) -> bool {
    match (stored, incoming) {
        (None, _) | (_, None) => true,
        (Some(stored), Some(incoming)) => stored == incoming,
    }
}

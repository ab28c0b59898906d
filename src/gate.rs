//! Registration gate
//!
//! Makes "is this installation registered?" a one-time decision that
//! arbitrarily many operations can wait on. The gate is a versioned latch
//! over a `watch` channel: resolving stores the current client and wakes
//! every waiter, and resolving again replaces the value without reopening
//! the gate.

use std::sync::Arc;

use tokio::sync::watch;

use crate::types::Client;

/// One-shot open, many-waiter registration gate.
///
/// Transitions once from unresolved to resolved within a process lifetime.
/// Re-registration swaps the resolved client (last value wins) but never
/// returns the gate to a blocking state.
pub struct RegistrationGate {
    tx: watch::Sender<Option<Arc<Client>>>,
}

impl RegistrationGate {
    /// Create an unresolved gate.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Marks registration as resolved and wakes all waiters.
    ///
    /// Idempotent: a second call replaces the current client without
    /// blocking or erroring.
    pub fn resolve(&self, client: Client) {
        self.tx.send_replace(Some(Arc::new(client)));
    }

    /// Returns the current client without waiting.
    pub fn current(&self) -> Option<Arc<Client>> {
        self.tx.borrow().clone()
    }

    /// Whether the gate has been resolved at least once.
    pub fn is_resolved(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Waits until the gate has been resolved at least once.
    ///
    /// Suspends the calling task; never busy-waits. There is no timeout and
    /// no cancellation: if nothing ever resolves the gate the returned
    /// future stays pending for the life of the process.
    pub async fn resolved(&self) -> Arc<Client> {
        let mut rx = self.tx.subscribe();
        loop {
            if let Some(client) = rx.borrow_and_update().clone() {
                return client;
            }
            if rx.changed().await.is_err() {
                // The sender half lives inside the gate itself, so it cannot
                // drop while a caller borrows `self`; block forever rather
                // than spin if that ever changes.
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for RegistrationGate {
    fn default() -> Self {
        Self::new()
    }
}

//! Device token acquisition boundary

use async_trait::async_trait;

use crate::error::Result;

/// Supplies a push registration token for this installation.
///
/// Implementations wrap whatever push transport the platform offers. Token
/// acquisition may fail for transient network or service reasons; the
/// coordinator logs the failure and abandons the registration attempt. No
/// retry policy lives on this side of the boundary.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtains a registration token for the given sender id.
    async fn obtain_token(&self, sender_id: &str) -> Result<String>;
}

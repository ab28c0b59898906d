//! Remote API boundary for the Pushline service
//!
//! [`RemoteApi`] is the signed HTTP surface the coordinator talks to;
//! [`HttpApi`] is the shipped implementation. Keeping the boundary a trait
//! lets tests substitute a recording double without touching the network.

mod client;

pub use client::{HttpApi, BASE_URL};

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Client, Environment, EventRecord, TagValue};

/// Signed HTTP surface of the Pushline service.
///
/// Credentials travel with each call because every request is signed
/// individually; implementations hold no per-installation state.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Creates a client record for this installation.
    async fn create_client(
        &self,
        token: Option<&str>,
        application_id: i64,
        secret: &str,
        environment: Environment,
    ) -> Result<Client>;

    /// Posts an event for a registered client.
    ///
    /// Returns the record carrying the server-assigned timestamp.
    async fn post_event(
        &self,
        client: &Client,
        secret: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<EventRecord>;

    /// Sets a tag on a registered client.
    async fn set_tag(
        &self,
        client: &Client,
        secret: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<TagValue>;
}

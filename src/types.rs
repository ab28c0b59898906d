//! Core domain types for pushline
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Client** | A device installation registered with the Pushline service |
//! | **Tag** | A name/value attribute attached to a client (e.g. `OS = Android`) |
//! | **Event** | A named occurrence reported for a client (e.g. `launch`) |
//!
//! A client is created at most once per installation; re-registration with a
//! changed push token supersedes the old client with a new one rather than
//! mutating it in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ============================================
// Environment
// ============================================

/// Deployment environment a client is registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Returns the wire representation of this environment
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Development => "development",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Environment::Production),
            "development" => Ok(Environment::Development),
            other => Err(Error::Config(format!("unknown environment: {}", other))),
        }
    }
}

// ============================================
// Client
// ============================================

/// A device installation registered with the service.
///
/// Constructed either from the local store or from a successful
/// `create_client` call, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Server-assigned client id
    pub id: i64,
    /// Application this client belongs to
    pub application_id: i64,
    /// Push registration token, if one was known at registration time
    pub token: Option<String>,
    /// Environment the client was registered against
    pub environment: Environment,
}

// ============================================
// Tags and events
// ============================================

/// A name/value tag attached to a client.
///
/// Names are case-sensitive keys; values are compared case-insensitively
/// when deciding whether a tag has changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
    /// Tag name (case-sensitive key)
    pub name: String,
    /// Tag value
    pub value: Option<String>,
}

impl TagValue {
    /// Create a tag value
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Case-insensitive value comparison used for change detection.
    ///
    /// Two absent values count as equal.
    pub fn same_value(&self, other: Option<&str>) -> bool {
        match (self.value.as_deref(), other) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// An event reported for a client.
///
/// Transient: events are never persisted locally. The timestamp is assigned
/// by the server when the event is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event name
    pub name: String,
    /// Optional event value
    pub value: Option<String>,
    /// Server-assigned timestamp
    pub timestamp: DateTime<Utc>,
}

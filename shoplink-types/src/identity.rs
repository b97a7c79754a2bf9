//! Paired host/endpoint identifiers.
//!
//! The host system identifies entities with integers, the endpoint store with
//! opaque strings. Either half may be missing while a record is in flight.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of a minted endpoint id (a UUID v4 in simple hex form).
pub const ENDPOINT_ID_LEN: usize = 32;

/// Mints a new endpoint id: 128 random bits rendered as 32 lowercase hex
/// characters.
#[must_use]
pub fn new_endpoint_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Identity of a synchronizable entity on both sides of the bridge.
///
/// An empty endpoint string is treated exactly like a missing one: the
/// entity has not been written to the endpoint store yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, deserialize_with = "empty_as_none")]
    endpoint: Option<String>,
    #[serde(default)]
    host: Option<i64>,
}

impl Identity {
    /// Creates an identity with neither side assigned.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            endpoint: None,
            host: None,
        }
    }

    /// Creates an identity known only by its endpoint id.
    #[must_use]
    pub fn from_endpoint(endpoint: impl Into<String>) -> Self {
        let mut id = Self::new();
        id.set_endpoint(endpoint);
        id
    }

    /// Creates an identity known only by its host id.
    #[must_use]
    pub const fn from_host(host: i64) -> Self {
        Self {
            endpoint: None,
            host: Some(host),
        }
    }

    /// Returns this identity with the host id set.
    #[must_use]
    pub fn with_host(mut self, host: i64) -> Self {
        self.host = Some(host);
        self
    }

    /// Returns the endpoint id, or `None` when unassigned or empty.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref().filter(|e| !e.is_empty())
    }

    /// Returns the host id, if known.
    pub const fn host(&self) -> Option<i64> {
        self.host
    }

    /// Sets the endpoint id. An empty string clears it.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        self.endpoint = if endpoint.is_empty() { None } else { Some(endpoint) };
    }

    /// True once the endpoint store has assigned an id.
    pub fn has_endpoint(&self) -> bool {
        self.endpoint().is_some()
    }

    /// True when neither side is known.
    pub fn is_empty(&self) -> bool {
        self.endpoint().is_none() && self.host.is_none()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.endpoint(), self.host) {
            (Some(e), Some(h)) => write!(f, "{e}<->{h}"),
            (Some(e), None) => write!(f, "{e}<->?"),
            (None, Some(h)) => write!(f, "?<->{h}"),
            (None, None) => f.write_str("?<->?"),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|e| !e.is_empty()))
}

//! Newtype wrapper for store-assigned record keys.
//!
//! The persistence service hands out opaque string keys (Firebase push keys)
//! when a record is first written. Wrapping them prevents accidentally mixing
//! record keys with other strings such as zip codes.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a persisted user record.
///
/// Assigned by the store on creation and immutable thereafter. The value is
/// treated as an opaque token; nothing in the service inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create an ID from a store-assigned key.
    #[must_use]
    pub const fn new(key: String) -> Self {
        Self(key)
    }

    /// Get the underlying key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for UserId {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

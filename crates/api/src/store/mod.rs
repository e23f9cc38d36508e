//! Persistence for user records.
//!
//! Records live in an external document store keyed by opaque ids. The route
//! handlers only ever see the [`UserStore`] port; the production
//! implementation is [`FirebaseClient`], and tests substitute an in-memory
//! double. Realtime subscriptions are a frontend concern and have no
//! counterpart here.

pub mod firebase;

pub use firebase::FirebaseClient;

use async_trait::async_trait;
use thiserror::Error;

use zipdir_core::{UserDocument, UserId, UserRecord};

/// Errors that can occur when talking to the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse the store response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Port for user record persistence.
///
/// `insert` assigns the record's id; every other operation addresses an id
/// the caller already holds. Writes are wholesale document replacements, so
/// callers must pass fully-formed documents.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch all records, resolved.
    async fn list(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Fetch one record by id, or `None` if absent.
    async fn get(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError>;

    /// Persist a new document; the store assigns and returns the id.
    async fn insert(&self, document: &UserDocument) -> Result<UserRecord, StoreError>;

    /// Replace the document stored under `id` wholesale.
    async fn overwrite(
        &self,
        id: &UserId,
        document: &UserDocument,
    ) -> Result<UserRecord, StoreError>;

    /// Delete the record stored under `id`.
    async fn remove(&self, id: &UserId) -> Result<(), StoreError>;
}

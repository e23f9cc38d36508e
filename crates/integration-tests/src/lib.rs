//! Integration test support for Zipdir.
//!
//! Provides in-memory doubles for the two collaborator ports plus a helper
//! that assembles the real router around them, so the tests in `tests/`
//! exercise the full request path without a database or network.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p zipdir-integration-tests
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use secrecy::SecretString;

use zipdir_api::config::{ApiConfig, FirebaseConfig, OpenWeatherConfig};
use zipdir_api::geocode::{GeocodeError, Geocoder};
use zipdir_api::routes;
use zipdir_api::state::AppState;
use zipdir_api::store::{StoreError, UserStore};
use zipdir_core::{ResolvedLocation, UserDocument, UserId, UserRecord};

/// In-memory store double that records write calls.
///
/// Keys are assigned sequentially on insert (`user-1`, `user-2`, ...);
/// records can also be seeded under fixed keys. Every mutation (insert,
/// overwrite, remove) bumps the write counter so tests can assert that a
/// failed operation committed nothing.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, UserDocument>>,
    next_key: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record under a fixed key without counting it as a write.
    pub fn seed(&self, id: &str, document: UserDocument) {
        self.records
            .lock()
            .expect("store lock poisoned")
            .insert(id.to_owned(), document);
    }

    /// Number of mutations performed since construction.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current document stored under `id`, if any.
    #[must_use]
    pub fn snapshot(&self, id: &str) -> Option<UserDocument> {
        self.records
            .lock()
            .expect("store lock poisoned")
            .get(id)
            .cloned()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("store lock poisoned")
            .iter()
            .map(|(key, document)| UserRecord::new(UserId::from(key.as_str()), document.clone()))
            .collect())
    }

    async fn get(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("store lock poisoned")
            .get(id.as_str())
            .map(|document| UserRecord::new(id.clone(), document.clone())))
    }

    async fn insert(&self, document: &UserDocument) -> Result<UserRecord, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let key = format!("user-{}", self.next_key.fetch_add(1, Ordering::SeqCst) + 1);
        self.records
            .lock()
            .expect("store lock poisoned")
            .insert(key.clone(), document.clone());
        Ok(UserRecord::new(UserId::new(key), document.clone()))
    }

    async fn overwrite(
        &self,
        id: &UserId,
        document: &UserDocument,
    ) -> Result<UserRecord, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .expect("store lock poisoned")
            .insert(id.as_str().to_owned(), document.clone());
        Ok(UserRecord::new(id.clone(), document.clone()))
    }

    async fn remove(&self, id: &UserId) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .expect("store lock poisoned")
            .remove(id.as_str());
        Ok(())
    }
}

/// Geocoder double driven by a per-zip script.
///
/// Unscripted zip codes fail with an upstream error so tests notice
/// unexpected lookups; the call counter makes no-call assertions possible.
#[derive(Default)]
pub struct ScriptedGeocoder {
    script: Mutex<HashMap<String, Result<ResolvedLocation, ScriptedFailure>>>,
    calls: AtomicUsize,
}

/// Failure kinds a scripted zip code can produce.
#[derive(Debug, Clone, Copy)]
enum ScriptedFailure {
    NotFound,
    Unavailable,
}

impl ScriptedGeocoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a zip code to resolve successfully.
    pub fn resolves(&self, zip_code: &str, location: ResolvedLocation) {
        self.script
            .lock()
            .expect("script lock poisoned")
            .insert(zip_code.to_owned(), Ok(location));
    }

    /// Script a zip code to be reported as unknown.
    pub fn unknown(&self, zip_code: &str) {
        self.script
            .lock()
            .expect("script lock poisoned")
            .insert(zip_code.to_owned(), Err(ScriptedFailure::NotFound));
    }

    /// Script a zip code to fail with an upstream error.
    pub fn unavailable(&self, zip_code: &str) {
        self.script
            .lock()
            .expect("script lock poisoned")
            .insert(zip_code.to_owned(), Err(ScriptedFailure::Unavailable));
    }

    /// Number of resolution calls made since construction.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn resolve(&self, zip_code: &str) -> Result<ResolvedLocation, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self
            .script
            .lock()
            .expect("script lock poisoned")
            .get(zip_code)
        {
            Some(Ok(location)) => Ok(*location),
            Some(Err(ScriptedFailure::NotFound)) => {
                Err(GeocodeError::UnknownZip(zip_code.to_owned()))
            }
            Some(Err(ScriptedFailure::Unavailable)) | None => Err(GeocodeError::Api {
                status: 503,
                message: "unscripted or unavailable".to_owned(),
            }),
        }
    }
}

/// Configuration filled with placeholder values; handlers never dial out in
/// these tests, so the URLs and keys are inert.
#[must_use]
pub fn test_config() -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".parse().expect("valid address"),
        port: 0,
        cors_origin: None,
        firebase: FirebaseConfig {
            database_url: "https://unused-rtdb.firebaseio.test".to_owned(),
            auth_token: None,
        },
        openweather: OpenWeatherConfig {
            api_key: SecretString::from("unused"),
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Assemble the real router around the given doubles.
#[must_use]
pub fn test_app(store: Arc<MemoryStore>, geocoder: Arc<ScriptedGeocoder>) -> Router {
    let state = AppState::new(test_config(), store, geocoder);
    routes::routes().with_state(state)
}

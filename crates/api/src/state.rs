//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::geocode::Geocoder;
use crate::store::UserStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The store and geocoder are
/// held behind their ports so tests can substitute doubles; nothing in the
/// service reaches for a global connection.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    store: Arc<dyn UserStore>,
    geocoder: Arc<dyn Geocoder>,
}

impl AppState {
    /// Create a new application state from explicit collaborator handles.
    #[must_use]
    pub fn new(config: ApiConfig, store: Arc<dyn UserStore>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                geocoder,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the user record store.
    #[must_use]
    pub fn store(&self) -> &dyn UserStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the geocoding client.
    #[must_use]
    pub fn geocoder(&self) -> &dyn Geocoder {
        self.inner.geocoder.as_ref()
    }
}

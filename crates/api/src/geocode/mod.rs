//! Zip code resolution via an external geocoding collaborator.
//!
//! The workflow only ever sees the [`Geocoder`] port; the production
//! implementation is [`OpenWeatherClient`], and tests substitute scripted
//! doubles.

pub mod openweather;

pub use openweather::OpenWeatherClient;

use async_trait::async_trait;
use thiserror::Error;

use zipdir_core::ResolvedLocation;

/// Errors that can occur when resolving a zip code.
///
/// `UnknownZip` is the only variant that represents a caller fault (the zip
/// code itself does not resolve); everything else is an upstream or transport
/// failure. Callers that need to distinguish the two must match on the
/// variant, not on message text.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The upstream explicitly reported the zip code as unknown.
    #[error("Unknown zip code: {0}")]
    UnknownZip(String),

    /// The upstream returned a non-success status other than not-found.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse the upstream response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Port for zip code resolution.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a zip code to its latitude, longitude, and UTC offset.
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError::UnknownZip` if the upstream reports the zip
    /// code as invalid, and another variant for any other failure.
    async fn resolve(&self, zip_code: &str) -> Result<ResolvedLocation, GeocodeError>;
}

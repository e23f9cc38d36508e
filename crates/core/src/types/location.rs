//! Resolved geolocation data for a zip code.

use serde::{Deserialize, Serialize};

/// The derived triple produced by a successful zip code resolution.
///
/// These values are never user-supplied; they always come from the geocoding
/// collaborator and are replaced wholesale whenever the zip code changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// Latitude in floating-point degrees.
    pub latitude: f64,
    /// Longitude in floating-point degrees.
    pub longitude: f64,
    /// Signed offset from UTC in seconds.
    pub timezone_offset_seconds: i32,
}

impl ResolvedLocation {
    /// Create a resolved location from its components.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, timezone_offset_seconds: i32) -> Self {
        Self {
            latitude,
            longitude,
            timezone_offset_seconds,
        }
    }
}

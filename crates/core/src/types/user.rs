//! User record types.
//!
//! A persisted user is a store key plus a document of camelCase wire fields.
//! The document holds the user-supplied `name` and `zipCode` together with
//! the derived location triple; the key (`id`) lives outside the document
//! because the store persists documents keyed by id.

use serde::{Deserialize, Serialize};

use super::id::UserId;
use super::location::ResolvedLocation;

/// User-submitted fields for create and update requests.
///
/// Values are taken as-is: no trimming, no zero-padding, no format
/// validation beyond the presence checks performed by the enrichment
/// workflow. Fields default to empty when absent so a missing field surfaces
/// as a presence-check failure rather than a deserialization error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub zip_code: String,
}

/// The persisted body of a user record, without its store key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    /// Display name, user-supplied.
    pub name: String,
    /// US zip code as submitted, user-supplied.
    pub zip_code: String,
    /// Latitude in degrees, derived from the zip code.
    pub latitude: f64,
    /// Longitude in degrees, derived from the zip code.
    pub longitude: f64,
    /// Seconds offset from UTC, derived from the zip code.
    pub timezone_offset_seconds: i32,
}

impl UserDocument {
    /// Assemble a document from submitted fields and a resolved location.
    #[must_use]
    pub const fn new(name: String, zip_code: String, location: ResolvedLocation) -> Self {
        Self {
            name,
            zip_code,
            latitude: location.latitude,
            longitude: location.longitude,
            timezone_offset_seconds: location.timezone_offset_seconds,
        }
    }

    /// The derived location triple currently held by this document.
    #[must_use]
    pub const fn location(&self) -> ResolvedLocation {
        ResolvedLocation::new(self.latitude, self.longitude, self.timezone_offset_seconds)
    }
}

/// A fully persisted user record: store key plus document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(flatten)]
    pub document: UserDocument,
}

impl UserRecord {
    /// Pair a store-assigned key with its document.
    #[must_use]
    pub const fn new(id: UserId, document: UserDocument) -> Self {
        Self { id, document }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> UserDocument {
        UserDocument::new(
            "Alice".to_owned(),
            "10001".to_owned(),
            ResolvedLocation::new(40.75, -73.99, -18000),
        )
    }

    #[test]
    fn test_document_wire_names_are_camel_case() {
        let json = serde_json::to_value(sample_document()).unwrap();
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["zipCode"], "10001");
        assert_eq!(json["latitude"], 40.75);
        assert_eq!(json["longitude"], -73.99);
        assert_eq!(json["timezoneOffsetSeconds"], -18000);
    }

    #[test]
    fn test_record_flattens_document_around_id() {
        let record = UserRecord::new(UserId::from("u1"), sample_document());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "u1");
        assert_eq!(json["zipCode"], "10001");

        let back: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_document_location_round_trip() {
        let doc = sample_document();
        assert_eq!(doc.location(), ResolvedLocation::new(40.75, -73.99, -18000));
    }

    #[test]
    fn test_draft_deserializes_camel_case() {
        let draft: UserDraft =
            serde_json::from_str(r#"{"name":"Alice","zipCode":"10001"}"#).unwrap();
        assert_eq!(draft.name, "Alice");
        assert_eq!(draft.zip_code, "10001");
    }
}

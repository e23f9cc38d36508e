//! Record enrichment workflow.
//!
//! Turns a user's create/update intent into a fully-formed record, calling
//! the geocoding collaborator exactly when necessary:
//!
//! - create always resolves the submitted zip code (there is no prior state
//!   to compare against);
//! - update resolves only when the submitted zip code differs from the stored
//!   one, otherwise the existing derived triple is kept as-is.
//!
//! Resolution happens before any write, so a failed lookup leaves the stored
//! record entirely unchanged: a record's zip code and derived triple always
//! move together.

use thiserror::Error;

use zipdir_core::{UserDocument, UserDraft, UserRecord};

use crate::geocode::{GeocodeError, Geocoder};

/// Errors produced by the enrichment workflow.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// A required field is missing. No collaborator call was made.
    #[error("{0}")]
    Validation(&'static str),

    /// The geocoding collaborator reported the zip code as unknown. This is
    /// a caller fault: the zip code itself is invalid.
    #[error("Invalid zip code: {0}")]
    UnresolvableZip(String),

    /// The geocoding collaborator failed for any other reason.
    #[error("Geocoding service unavailable: {0}")]
    Upstream(#[source] GeocodeError),
}

/// Check the presence constraints shared by create and update.
///
/// Values are compared as submitted; a whitespace-only name counts as
/// present.
fn validate(draft: &UserDraft) -> Result<(), EnrichError> {
    if draft.zip_code.is_empty() {
        return Err(EnrichError::Validation("Zip code is required"));
    }
    if draft.name.is_empty() {
        return Err(EnrichError::Validation("Name is required"));
    }
    Ok(())
}

/// Map a collaborator failure onto the workflow's error taxonomy.
///
/// Not-found is the caller's fault (the zip code does not resolve); every
/// other failure is an upstream fault and stays opaque to the caller.
fn lift(err: GeocodeError) -> EnrichError {
    match err {
        GeocodeError::UnknownZip(zip) => EnrichError::UnresolvableZip(zip),
        other => EnrichError::Upstream(other),
    }
}

/// Prepare a new record for insertion.
///
/// Always resolves the submitted zip code. The store assigns the id.
///
/// # Errors
///
/// Returns `Validation` if a field is missing (no collaborator call is
/// made), `UnresolvableZip` if the zip code does not resolve, and `Upstream`
/// for any other collaborator failure.
pub async fn prepare_create(
    geocoder: &dyn Geocoder,
    draft: &UserDraft,
) -> Result<UserDocument, EnrichError> {
    validate(draft)?;

    let location = geocoder.resolve(&draft.zip_code).await.map_err(lift)?;

    Ok(UserDocument::new(
        draft.name.clone(),
        draft.zip_code.clone(),
        location,
    ))
}

/// Prepare the replacement record for an update.
///
/// The result carries `existing`'s id and is meant to be written back
/// wholesale. On any error nothing must be written.
///
/// # Errors
///
/// Same taxonomy as [`prepare_create`].
pub async fn prepare_update(
    geocoder: &dyn Geocoder,
    existing: &UserRecord,
    draft: &UserDraft,
) -> Result<UserRecord, EnrichError> {
    validate(draft)?;

    // Raw string comparison, deliberately without normalization: "1001" and
    // "01001" are treated as different zip codes.
    let location = if draft.zip_code == existing.document.zip_code {
        existing.document.location()
    } else {
        geocoder.resolve(&draft.zip_code).await.map_err(lift)?
    };

    Ok(UserRecord::new(
        existing.id.clone(),
        UserDocument::new(draft.name.clone(), draft.zip_code.clone(), location),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use zipdir_core::{ResolvedLocation, UserId};

    use super::*;

    /// What the scripted geocoder should do when called.
    enum Script {
        Resolve(ResolvedLocation),
        NotFound,
        Unavailable,
    }

    /// Geocoder double that counts calls and follows a fixed script.
    struct ScriptedGeocoder {
        script: Script,
        calls: AtomicUsize,
    }

    impl ScriptedGeocoder {
        fn new(script: Script) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Geocoder for ScriptedGeocoder {
        async fn resolve(&self, zip_code: &str) -> Result<ResolvedLocation, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Resolve(location) => Ok(*location),
                Script::NotFound => Err(GeocodeError::UnknownZip(zip_code.to_owned())),
                Script::Unavailable => Err(GeocodeError::Api {
                    status: 503,
                    message: "upstream down".to_owned(),
                }),
            }
        }
    }

    fn draft(name: &str, zip_code: &str) -> UserDraft {
        UserDraft {
            name: name.to_owned(),
            zip_code: zip_code.to_owned(),
        }
    }

    fn nyc() -> ResolvedLocation {
        ResolvedLocation::new(40.75, -73.99, -18000)
    }

    fn existing_record() -> UserRecord {
        UserRecord::new(
            UserId::from("u1"),
            UserDocument::new("Alice".to_owned(), "10001".to_owned(), nyc()),
        )
    }

    #[tokio::test]
    async fn test_create_resolves_and_shapes_record() {
        let geocoder = ScriptedGeocoder::new(Script::Resolve(nyc()));

        let document = prepare_create(&geocoder, &draft("Alice", "10001"))
            .await
            .unwrap();

        assert_eq!(document.name, "Alice");
        assert_eq!(document.zip_code, "10001");
        assert_eq!(document.location(), nyc());
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn test_create_missing_zip_skips_collaborator() {
        let geocoder = ScriptedGeocoder::new(Script::Resolve(nyc()));

        let err = prepare_create(&geocoder, &draft("Alice", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichError::Validation(_)));
        assert_eq!(err.to_string(), "Zip code is required");
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_missing_name_skips_collaborator() {
        let geocoder = ScriptedGeocoder::new(Script::Resolve(nyc()));

        let err = prepare_create(&geocoder, &draft("", "10001"))
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichError::Validation(_)));
        assert_eq!(err.to_string(), "Name is required");
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_unknown_zip_maps_to_unresolvable() {
        let geocoder = ScriptedGeocoder::new(Script::NotFound);

        let err = prepare_create(&geocoder, &draft("Alice", "00000"))
            .await
            .unwrap_err();

        match err {
            EnrichError::UnresolvableZip(zip) => assert_eq!(zip, "00000"),
            other => panic!("expected UnresolvableZip, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_upstream_failure_maps_to_upstream() {
        let geocoder = ScriptedGeocoder::new(Script::Unavailable);

        let err = prepare_create(&geocoder, &draft("Alice", "10001"))
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_update_same_zip_keeps_triple_without_calling() {
        // The script would return a different triple; it must never be asked.
        let geocoder =
            ScriptedGeocoder::new(Script::Resolve(ResolvedLocation::new(0.0, 0.0, 0)));
        let existing = existing_record();

        let updated = prepare_update(&geocoder, &existing, &draft("Alicia", "10001"))
            .await
            .unwrap();

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.document.name, "Alicia");
        assert_eq!(updated.document.zip_code, "10001");
        assert_eq!(updated.document.location(), nyc());
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn test_update_changed_zip_replaces_triple() {
        let denver = ResolvedLocation::new(39.74, -104.99, -25200);
        let geocoder = ScriptedGeocoder::new(Script::Resolve(denver));
        let existing = existing_record();

        let updated = prepare_update(&geocoder, &existing, &draft("Alice", "80202"))
            .await
            .unwrap();

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.document.zip_code, "80202");
        assert_eq!(updated.document.location(), denver);
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn test_update_zip_compared_without_normalization() {
        // "1001" vs stored "10001": different raw strings, so a lookup runs.
        let geocoder = ScriptedGeocoder::new(Script::Resolve(nyc()));
        let existing = existing_record();

        prepare_update(&geocoder, &existing, &draft("Alice", "1001"))
            .await
            .unwrap();

        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_zip_maps_to_unresolvable() {
        let geocoder = ScriptedGeocoder::new(Script::NotFound);
        let existing = existing_record();

        let err = prepare_update(&geocoder, &existing, &draft("Alicia", "00000"))
            .await
            .unwrap_err();

        match err {
            EnrichError::UnresolvableZip(zip) => assert_eq!(zip, "00000"),
            other => panic!("expected UnresolvableZip, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_upstream_failure_maps_to_upstream() {
        let geocoder = ScriptedGeocoder::new(Script::Unavailable);
        let existing = existing_record();

        let err = prepare_update(&geocoder, &existing, &draft("Alice", "80202"))
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_update_missing_fields_skip_collaborator() {
        let geocoder = ScriptedGeocoder::new(Script::Resolve(nyc()));
        let existing = existing_record();

        let err = prepare_update(&geocoder, &existing, &draft("", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichError::Validation(_)));
        assert_eq!(geocoder.calls(), 0);
    }
}

//! User record route handlers.
//!
//! Thin CRUD layer over the store and the enrichment workflow: handlers
//! validate nothing themselves beyond what the workflow enforces, and every
//! write goes through `enrich::prepare_create` / `enrich::prepare_update`
//! first so that no partially-enriched record is ever persisted.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use tracing::instrument;

use zipdir_core::{UserDraft, UserId, UserRecord};

use crate::enrich;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Response envelope for read operations.
#[derive(Debug, Serialize)]
struct DataResponse<T> {
    data: T,
}

/// Response envelope for create/update operations.
#[derive(Debug, Serialize)]
struct MutationResponse {
    message: &'static str,
    data: UserRecord,
}

/// Response envelope for delete.
#[derive(Debug, Serialize)]
struct DeleteResponse {
    message: &'static str,
}

/// List all user records, resolved.
#[instrument(skip(state))]
async fn list_users(State(state): State<AppState>) -> Result<Json<DataResponse<Vec<UserRecord>>>> {
    let users = state.store().list().await?;
    Ok(Json(DataResponse { data: users }))
}

/// Fetch a single user record by id.
#[instrument(skip(state))]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<UserRecord>>> {
    let id = UserId::new(id);
    let record = state
        .store()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    Ok(Json(DataResponse { data: record }))
}

/// Create a user record.
///
/// Runs the enrichment create path: presence checks, then a location lookup
/// for the submitted zip code, then the insert. The store assigns the id.
#[instrument(skip(state, draft), fields(name = %draft.name, zip_code = %draft.zip_code))]
async fn create_user(
    State(state): State<AppState>,
    Json(draft): Json<UserDraft>,
) -> Result<(StatusCode, Json<MutationResponse>)> {
    let document = enrich::prepare_create(state.geocoder(), &draft).await?;
    let record = state.store().insert(&document).await?;

    tracing::info!(id = %record.id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            message: "User created",
            data: record,
        }),
    ))
}

/// Update a user record wholesale.
///
/// Fetches the existing record first (404 if absent), then runs the
/// enrichment update path. The lookup, when one is needed, happens before
/// the overwrite, so a failed resolution leaves the stored record untouched.
#[instrument(skip(state, draft), fields(name = %draft.name, zip_code = %draft.zip_code))]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<MutationResponse>> {
    let id = UserId::new(id);
    let existing = state
        .store()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    let updated = enrich::prepare_update(state.geocoder(), &existing, &draft).await?;
    let record = state.store().overwrite(&id, &updated.document).await?;

    tracing::info!(id = %record.id, "User updated");
    Ok(Json(MutationResponse {
        message: "User updated",
        data: record,
    }))
}

/// Delete a user record.
#[instrument(skip(state))]
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = UserId::new(id);
    state
        .store()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    state.store().remove(&id).await?;

    tracing::info!(id = %id, "User deleted");
    Ok(Json(DeleteResponse {
        message: "User deleted",
    }))
}

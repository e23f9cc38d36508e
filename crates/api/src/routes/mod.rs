//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health         - Health check (wired in main)
//!
//! # Users
//! GET    /users          - List all records
//! POST   /users          - Create record (enrichment create path)
//! GET    /users/{id}     - Fetch one record
//! PUT    /users/{id}     - Update record (enrichment update path)
//! DELETE /users/{id}     - Delete record
//! ```

pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    users::router()
}

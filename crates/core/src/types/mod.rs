//! Core types for Zipdir.
//!
//! This module provides the domain types shared between the API service and
//! its tests.

pub mod id;
pub mod location;
pub mod user;

pub use id::UserId;
pub use location::ResolvedLocation;
pub use user::{UserDocument, UserDraft, UserRecord};

//! Zipdir Core - Shared types library.
//!
//! This crate provides common types used across all Zipdir components:
//! - `api` - REST service managing user records
//! - `integration-tests` - End-to-end router tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - User records, drafts, and resolved geolocation data

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

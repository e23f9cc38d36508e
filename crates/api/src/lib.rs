//! Zipdir API library.
//!
//! This crate provides the service functionality as a library, allowing the
//! router and workflow to be exercised by the integration tests without a
//! running server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod enrich;
pub mod error;
pub mod geocode;
pub mod routes;
pub mod state;
pub mod store;

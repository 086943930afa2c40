//! Argenta Core - Shared types library.
//!
//! This crate provides common types used across the Argenta components:
//! - `storefront` - The storefront server (public API + admin routes)
//! - `integration-tests` - End-to-end API tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! Repositories in the storefront crate map database rows into these types
//! and bind their primitive representations back into queries.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

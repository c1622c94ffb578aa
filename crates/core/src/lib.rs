//! 404 Redirect Core - Shared types and App Proxy signature verification.
//!
//! This crate provides the pieces used across all components of the app:
//! - `app` - HTTP service (App Proxy endpoint and admin settings API)
//! - `cli` - Command-line tools for migrations, signing and settings
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Signature verification in particular is a
//! side-effect free predicate that can be called from any number of request
//! handlers concurrently.
//!
//! # Modules
//!
//! - [`proxy`] - Signed query canonicalization and HMAC-SHA256 verification
//! - [`types`] - Newtype wrappers for shop domains, IDs, and redirect settings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod proxy;
pub mod types;

pub use proxy::{QueryParams, SIGNATURE_PARAM, canonical_payload, sign, verify};
pub use types::*;

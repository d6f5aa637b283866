//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller's identity via the configured resolver.

pub mod auth;

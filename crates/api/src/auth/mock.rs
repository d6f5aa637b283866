//! Header-driven identity for local development and tests.

use axum::http::HeaderMap;
use hours_core::identity::Identity;

use super::{IdentityError, IdentityResolver};

pub const OID_HEADER: &str = "x-dev-user-oid";
pub const EMAIL_HEADER: &str = "x-dev-user-email";
pub const NAME_HEADER: &str = "x-dev-user-name";

pub const DEFAULT_OID: &str = "00000000-0000-0000-0000-000000000001";
pub const DEFAULT_EMAIL: &str = "dev@impactpoint.local";
pub const DEFAULT_NAME: &str = "Dev User";

/// Trusts the `X-Dev-User-*` headers, falling back to a fixed development
/// user for any that are missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockResolver;

#[async_trait::async_trait]
impl IdentityResolver for MockResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Identity, IdentityError> {
        Ok(Identity {
            subject: header_or(headers, OID_HEADER, DEFAULT_OID),
            email: Some(header_or(headers, EMAIL_HEADER, DEFAULT_EMAIL)),
            display_name: Some(header_or(headers, NAME_HEADER, DEFAULT_NAME)),
        })
    }
}

fn header_or(headers: &HeaderMap, name: &str, default: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

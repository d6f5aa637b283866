//! Caller identity resolution.
//!
//! - [`mock`] -- Development identity taken from `X-Dev-User-*` headers.
//! - [`azure`] -- Azure AD bearer tokens verified against the tenant's JWKS.

pub mod azure;
pub mod mock;

use std::sync::Arc;

use axum::http::HeaderMap;
use hours_core::error::CoreError;
use hours_core::identity::Identity;

use crate::config::AuthConfig;

pub use azure::AzureResolver;
pub use mock::MockResolver;

/// Errors raised while establishing who the caller is.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Invalid Authorization format. Expected: Bearer <token>")]
    MalformedHeader,

    #[error("Token header has no key id")]
    MissingKeyId,

    #[error("No signing key matches key id '{0}'")]
    UnknownKey(String),

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] CoreError),

    /// The signing keys could not be fetched. Not the caller's fault.
    #[error("Failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),
}

/// Produces the caller's [`Identity`] from request headers.
#[async_trait::async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Identity, IdentityError>;
}

/// Build the resolver selected by configuration.
pub fn resolver_for(config: &AuthConfig) -> Arc<dyn IdentityResolver> {
    match config {
        AuthConfig::Mock => Arc::new(MockResolver),
        AuthConfig::Azure {
            tenant_id,
            client_id,
        } => Arc::new(AzureResolver::new(tenant_id, client_id)),
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, IdentityError> {
    let value = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(IdentityError::MissingToken)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(IdentityError::MalformedHeader)
}

//! Azure AD access-token verification.
//!
//! Tokens are RS256-signed by one of the tenant's published keys. The key
//! set is fetched lazily, cached, and refetched when a token names a key id
//! the cache does not know (keys rotate). Refetches are at most one per
//! [`REFRESH_COOLDOWN`].

use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use hours_core::identity::{identity_from_claims, Identity};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{bearer_token, IdentityError, IdentityResolver};

const AUTHORITY: &str = "https://login.microsoftonline.com";

/// Minimum time between two fetches of the key set.
pub const REFRESH_COOLDOWN: Duration = Duration::from_secs(60);

struct KeyCache {
    keys: JwkSet,
    fetched_at: Option<Instant>,
}

impl KeyCache {
    fn key(&self, kid: &str) -> Result<Option<DecodingKey>, IdentityError> {
        Ok(self.keys.find(kid).map(DecodingKey::from_jwk).transpose()?)
    }

    fn refresh_allowed(&self) -> bool {
        self.fetched_at
            .map_or(true, |at| at.elapsed() >= REFRESH_COOLDOWN)
    }
}

/// Verifies Azure AD v2 bearer tokens for one tenant and application.
pub struct AzureResolver {
    http: reqwest::Client,
    jwks_url: String,
    issuer: String,
    audience: String,
    cache: RwLock<KeyCache>,
}

impl AzureResolver {
    pub fn new(tenant_id: &str, client_id: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            jwks_url: format!("{AUTHORITY}/{tenant_id}/discovery/v2.0/keys"),
            issuer: format!("{AUTHORITY}/{tenant_id}/v2.0"),
            audience: client_id.to_string(),
            cache: RwLock::new(KeyCache {
                keys: JwkSet { keys: Vec::new() },
                fetched_at: None,
            }),
        }
    }

    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// RS256 with audience and issuer pinned; `exp` is checked by default.
    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, IdentityError> {
        if let Some(key) = self.cache.read().await.key(kid)? {
            return Ok(key);
        }
        self.refresh_keys().await?;
        self.cache
            .read()
            .await
            .key(kid)?
            .ok_or_else(|| IdentityError::UnknownKey(kid.to_string()))
    }

    /// Refetch the key set unless another fetch started within the cooldown.
    /// The slot is claimed before the request, so a failed fetch also waits
    /// out the cooldown.
    async fn refresh_keys(&self) -> Result<(), IdentityError> {
        {
            let mut cache = self.cache.write().await;
            if !cache.refresh_allowed() {
                tracing::debug!(url = %self.jwks_url, "Skipping signing key refresh during cooldown");
                return Ok(());
            }
            cache.fetched_at = Some(Instant::now());
        }

        let set: JwkSet = self
            .http
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        tracing::info!(keys = set.keys.len(), url = %self.jwks_url, "Refreshed signing keys");
        self.cache.write().await.keys = set;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IdentityResolver for AzureResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Identity, IdentityError> {
        let token = bearer_token(headers)?;
        let kid = decode_header(token)?
            .kid
            .ok_or(IdentityError::MissingKeyId)?;
        let key = self.decoding_key(&kid).await?;

        let claims = decode::<Value>(token, &key, &self.validation())?.claims;
        Ok(identity_from_claims(&claims)?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn endpoints_are_tenant_scoped() {
        let resolver = AzureResolver::new("contoso-tenant", "app-client");
        assert_eq!(
            resolver.jwks_url(),
            "https://login.microsoftonline.com/contoso-tenant/discovery/v2.0/keys"
        );
        assert_eq!(
            resolver.issuer(),
            "https://login.microsoftonline.com/contoso-tenant/v2.0"
        );
    }

    #[tokio::test]
    async fn request_without_token_is_rejected() {
        let resolver = AzureResolver::new("t", "c");
        let result = resolver.resolve(&HeaderMap::new()).await;
        assert_matches!(result, Err(IdentityError::MissingToken));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected_before_key_lookup() {
        let resolver = AzureResolver::new("t", "c");
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer not-a-jwt"));
        let result = resolver.resolve(&headers).await;
        assert_matches!(result, Err(IdentityError::InvalidToken(_)));
    }

    fn empty_cache(fetched_at: Option<Instant>) -> KeyCache {
        KeyCache {
            keys: JwkSet { keys: Vec::new() },
            fetched_at,
        }
    }

    #[test]
    fn refresh_is_allowed_only_after_cooldown() {
        assert!(empty_cache(None).refresh_allowed());
        assert!(!empty_cache(Some(Instant::now())).refresh_allowed());
        let earlier = Instant::now()
            .checked_sub(REFRESH_COOLDOWN + Duration::from_secs(1))
            .unwrap();
        assert!(empty_cache(Some(earlier)).refresh_allowed());
    }

    #[tokio::test]
    async fn unknown_key_within_cooldown_is_rejected_without_fetching() {
        let resolver = AzureResolver::new("t", "c");
        let fetched_at = Instant::now();
        *resolver.cache.write().await = empty_cache(Some(fetched_at));

        let header = jsonwebtoken::Header {
            kid: Some("rotated-key".to_string()),
            ..jsonwebtoken::Header::new(Algorithm::HS256)
        };
        let token = jsonwebtoken::encode(
            &header,
            &serde_json::json!({ "sub": "someone" }),
            &jsonwebtoken::EncodingKey::from_secret(b"not-the-tenant-key"),
        )
        .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let result = resolver.resolve(&headers).await;

        assert_matches!(result, Err(IdentityError::UnknownKey(kid)) if kid == "rotated-key");
        assert_eq!(resolver.cache.read().await.fetched_at, Some(fetched_at));
    }
}

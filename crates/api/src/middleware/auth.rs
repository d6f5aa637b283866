//! Authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hours_core::identity::Identity;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved by the [`IdentityResolver`] in
/// [`AppState`].
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(subject = %user.identity.subject, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// [`IdentityResolver`]: crate::auth::IdentityResolver
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = state.identity.resolve(&parts.headers).await?;
        Ok(AuthUser { identity })
    }
}

//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use hours_db::models::app_user::{AppUser, UpsertAppUser};
use hours_db::repositories::AppUserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/auth/me
///
/// Provisions the caller as an app user on first sight and records the
/// sign-in on every call.
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<AppUser>> {
    let app_user = AppUserRepo::upsert(&state.pool, &UpsertAppUser::from(&user.identity)).await?;
    tracing::debug!(app_user_id = app_user.id, subject = %app_user.external_id, "Resolved app user");
    Ok(Json(app_user))
}

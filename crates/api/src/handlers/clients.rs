//! Handlers for the `/clients` resource.
//!
//! Clients are addressed by their identity pair
//! `/clients/{primary_id}/{secondary_id}`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hours_core::error::CoreError;
use hours_db::models::client::{Client, ClientFilter, CreateClient, UpdateClient};
use hours_db::repositories::ClientRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(primary_id: Uuid, secondary_id: Uuid) -> AppError {
    AppError::Core(CoreError::not_found(
        "Client",
        format!("{primary_id}/{secondary_id}"),
    ))
}

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = ClientRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/v1/clients?active=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<ClientFilter>,
) -> AppResult<Json<Vec<Client>>> {
    let clients = ClientRepo::list(&state.pool, &filter).await?;
    Ok(Json(clients))
}

/// GET /api/v1/clients/{primary_id}/{secondary_id}
pub async fn get_by_ids(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((primary_id, secondary_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Client>> {
    let client = ClientRepo::find_by_ids(&state.pool, primary_id, secondary_id)
        .await?
        .ok_or_else(|| not_found(primary_id, secondary_id))?;
    Ok(Json(client))
}

/// PUT /api/v1/clients/{primary_id}/{secondary_id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((primary_id, secondary_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    let client = ClientRepo::update(&state.pool, primary_id, secondary_id, &input)
        .await?
        .ok_or_else(|| not_found(primary_id, secondary_id))?;
    Ok(Json(client))
}

/// DELETE /api/v1/clients/{primary_id}/{secondary_id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((primary_id, secondary_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    if ClientRepo::delete(&state.pool, primary_id, secondary_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(primary_id, secondary_id))
    }
}

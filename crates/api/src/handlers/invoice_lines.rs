//! Handlers for the `/invoice-lines` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hours_core::error::CoreError;
use hours_core::types::DbId;
use hours_db::models::invoice_line::{InvoiceLine, NewInvoiceLine, UpdateInvoiceLine};
use hours_db::repositories::InvoiceLineRepo;

use super::invoices::check_line;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn line_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("InvoiceLine", id))
}

/// GET /api/v1/invoice-lines/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<InvoiceLine>> {
    let line = InvoiceLineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| line_not_found(id))?;
    Ok(Json(line))
}

/// PUT /api/v1/invoice-lines/{id}
///
/// Amounts are stored as supplied; nothing is recomputed.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvoiceLine>,
) -> AppResult<Json<InvoiceLine>> {
    let mode = state.config.invariant_mode;
    let line = InvoiceLineRepo::update(&state.pool, id, &input, |merged: &InvoiceLine| {
        check_line(mode, &NewInvoiceLine::from(merged))
    })
    .await?
    .ok_or_else(|| line_not_found(id))?;
    Ok(Json(line))
}

/// DELETE /api/v1/invoice-lines/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if InvoiceLineRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(line_not_found(id))
    }
}

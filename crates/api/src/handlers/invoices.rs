//! Handlers for the `/invoices` resource.
//!
//! Header totals are stored as submitted and never recomputed from the
//! lines. `GET /invoices/{id}/reconciliation` reports any drift.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hours_core::error::CoreError;
use hours_core::invariants::InvariantMode;
use hours_core::invoice::{
    check_invoice_totals, check_line_amounts, check_period, check_status, check_status_transition,
    sum_lines, validate_line_quantities, Reconciliation,
};
use hours_core::types::DbId;
use hours_db::models::invoice::{
    CreateInvoice, Invoice, InvoiceFilter, InvoiceWithLines, UpdateInvoice,
};
use hours_db::models::invoice_line::{CreateInvoiceLine, InvoiceLine, NewInvoiceLine};
use hours_db::repositories::{InvoiceLineRepo, InvoiceRepo};
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::invariants::enforce;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn invoice_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Invoice", id))
}

/// Fill a submitted line's omitted amounts, snapshotting the hourly rate
/// from the employee (else the project) when the line has none.
pub(crate) async fn resolve_line(
    state: &AppState,
    line: &CreateInvoiceLine,
) -> AppResult<NewInvoiceLine> {
    let rate = match line.hourly_rate {
        Some(rate) => rate,
        None => InvoiceLineRepo::snapshot_rate(&state.pool, line.employee_id, line.project_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "No hourly_rate given and none on file for employee {} or project {}",
                    line.employee_id, line.project_id
                )))
            })?,
    };
    Ok(line.resolve(rate))
}

/// Negative quantities are always rejected; the arithmetic between the
/// amounts is a soft invariant governed by `mode`.
pub(crate) fn check_line(mode: InvariantMode, line: &NewInvoiceLine) -> AppResult<()> {
    validate_line_quantities(line.hourly_rate, line.hours, line.discount)?;
    enforce(
        mode,
        "invoice_line",
        check_line_amounts(
            line.hourly_rate,
            line.hours,
            line.subtotal,
            line.discount,
            line.total,
        ),
    )
}

/// POST /api/v1/invoices
///
/// Inserts the header and its lines in one transaction.
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateInvoice>,
) -> AppResult<(StatusCode, Json<InvoiceWithLines>)> {
    let mode = state.config.invariant_mode;
    enforce(mode, "invoice", check_period(input.period_start, input.period_end))?;
    if let Some(status) = &input.status {
        enforce(mode, "invoice", check_status(status).map(|_| ()))?;
    }

    let mut lines = Vec::with_capacity(input.lines.len());
    for line in &input.lines {
        let resolved = resolve_line(&state, line).await?;
        check_line(mode, &resolved)?;
        lines.push(resolved);
    }

    let totals = sum_lines(lines.iter().map(|l| (l.hours, l.total)));
    enforce(
        mode,
        "invoice",
        check_invoice_totals(
            input.total_hours.unwrap_or(Decimal::ZERO),
            input.total_fees.unwrap_or(Decimal::ZERO),
            &totals,
        ),
    )?;

    let created = InvoiceRepo::create_with_lines(&state.pool, &input, &lines).await?;
    tracing::info!(
        invoice_id = created.invoice.id,
        lines = created.lines.len(),
        "Created invoice"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/invoices?client_primary_id=&client_secondary_id=&status=&period_start=&period_end=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<InvoiceFilter>,
) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = InvoiceRepo::list(&state.pool, &filter).await?;
    Ok(Json(invoices))
}

/// GET /api/v1/invoices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<InvoiceWithLines>> {
    let invoice = InvoiceRepo::find_with_lines(&state.pool, id)
        .await?
        .ok_or_else(|| invoice_not_found(id))?;
    Ok(Json(invoice))
}

/// PUT /api/v1/invoices/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvoice>,
) -> AppResult<Json<Invoice>> {
    let mode = state.config.invariant_mode;
    let status_changed = input.status.is_some();
    let invoice = InvoiceRepo::update(
        &state.pool,
        id,
        &input,
        |current: &Invoice, merged: &Invoice| -> AppResult<()> {
            enforce(mode, "invoice", check_period(merged.period_start, merged.period_end))?;
            if status_changed {
                enforce(
                    mode,
                    "invoice",
                    check_status_transition(&current.status, &merged.status),
                )?;
            }
            Ok(())
        },
    )
    .await?
    .ok_or_else(|| invoice_not_found(id))?;
    Ok(Json(invoice))
}

/// DELETE /api/v1/invoices/{id}
///
/// Lines are removed with the header.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if InvoiceRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(invoice_not_found(id))
    }
}

/// GET /api/v1/invoices/{id}/reconciliation
///
/// Compares stored header totals with the sums over the lines. Never writes.
pub async fn reconciliation(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Reconciliation>> {
    let report = InvoiceRepo::reconcile(&state.pool, id)
        .await?
        .ok_or_else(|| invoice_not_found(id))?;
    Ok(Json(report))
}

/// GET /api/v1/invoices/{id}/lines
pub async fn list_lines(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<InvoiceLine>>> {
    InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| invoice_not_found(id))?;
    let lines = InvoiceLineRepo::list_by_invoice(&state.pool, id).await?;
    Ok(Json(lines))
}

/// POST /api/v1/invoices/{id}/lines
///
/// Header totals are left as they are.
pub async fn create_line(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateInvoiceLine>,
) -> AppResult<(StatusCode, Json<InvoiceLine>)> {
    InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| invoice_not_found(id))?;

    let resolved = resolve_line(&state, &input).await?;
    check_line(state.config.invariant_mode, &resolved)?;

    let line = InvoiceLineRepo::create(&state.pool, id, &resolved).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

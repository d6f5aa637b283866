//! Handlers for the `/time-entries` resource.
//!
//! Recording an entry ensures its week exists in the same transaction.
//! Split-month hours are stored as submitted; whether they must add up to
//! `total_hours` depends on the configured invariant mode.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hours_core::error::CoreError;
use hours_core::invariants::InvariantMode;
use hours_core::types::{Date, DbId};
use hours_core::week::{
    allocate_split_hours, check_split_hours, derive_week, validate_entry_hours, validate_hours,
    DerivedWeek,
};
use hours_db::models::time_entry::{CreateTimeEntry, TimeEntry, TimeEntryFilter, UpdateTimeEntry};
use hours_db::repositories::TimeEntryRepo;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::invariants::enforce;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /time-entries/split-preview`.
#[derive(Debug, Deserialize)]
pub struct SplitPreviewParams {
    pub week_start: Date,
    pub total_hours: Decimal,
}

/// Suggested month allocation for an entry in a given week.
///
/// The hour fields are `None` when the week does not straddle two months.
#[derive(Debug, Serialize)]
pub struct SplitPreview {
    pub week: DerivedWeek,
    pub total_hours: Decimal,
    pub month_a_hours: Option<Decimal>,
    pub month_b_hours: Option<Decimal>,
}

/// Negative hours are always rejected; whether the split parts must add up
/// to `total_hours` depends on `mode`.
fn check_entry_hours(
    mode: InvariantMode,
    total_hours: Decimal,
    is_split_month: bool,
    month_a_hours: Option<Decimal>,
    month_b_hours: Option<Decimal>,
) -> AppResult<()> {
    validate_entry_hours(total_hours, month_a_hours, month_b_hours)?;
    enforce(
        mode,
        "time_entry",
        check_split_hours(total_hours, is_split_month, month_a_hours, month_b_hours),
    )
}

/// POST /api/v1/time-entries
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateTimeEntry>,
) -> AppResult<(StatusCode, Json<TimeEntry>)> {
    check_entry_hours(
        state.config.invariant_mode,
        input.total_hours,
        input.is_split_month.unwrap_or(false),
        input.month_a_hours,
        input.month_b_hours,
    )?;

    let entry = TimeEntryRepo::create(&state.pool, &input).await?;
    tracing::debug!(
        entry_id = entry.id,
        employee_id = entry.employee_id,
        week_start = %entry.week_start,
        "Recorded time entry"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/time-entries?employee_id=&project_id=&client_id=&week_start=&week_start_gte=&week_start_lte=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<TimeEntryFilter>,
) -> AppResult<Json<Vec<TimeEntry>>> {
    let entries = TimeEntryRepo::list(&state.pool, &filter).await?;
    Ok(Json(entries))
}

/// GET /api/v1/time-entries/split-preview?week_start=&total_hours=
///
/// Never writes.
pub async fn split_preview(
    _user: AuthUser,
    Query(params): Query<SplitPreviewParams>,
) -> AppResult<Json<SplitPreview>> {
    validate_hours("total_hours", params.total_hours)?;
    let week = derive_week(params.week_start);

    let (month_a_hours, month_b_hours) = match (week.qty_days_a, week.qty_days_b) {
        (Some(days_a), Some(days_b)) if week.is_split_month => {
            let (a, b) = allocate_split_hours(params.total_hours, days_a, days_b)?;
            (Some(a), Some(b))
        }
        _ => (None, None),
    };

    Ok(Json(SplitPreview {
        week,
        total_hours: params.total_hours,
        month_a_hours,
        month_b_hours,
    }))
}

/// GET /api/v1/time-entries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TimeEntry>> {
    let entry = TimeEntryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("TimeEntry", id)))?;
    Ok(Json(entry))
}

/// PUT /api/v1/time-entries/{id}
///
/// Only supplied fields overwrite. Moving the entry to another week ensures
/// that week exists. The merged row is checked while it is locked.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTimeEntry>,
) -> AppResult<Json<TimeEntry>> {
    let mode = state.config.invariant_mode;
    let entry = TimeEntryRepo::update(&state.pool, id, &input, |merged: &TimeEntry| {
        check_entry_hours(
            mode,
            merged.total_hours,
            merged.is_split_month,
            merged.month_a_hours,
            merged.month_b_hours,
        )
    })
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("TimeEntry", id)))?;
    Ok(Json(entry))
}

/// DELETE /api/v1/time-entries/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TimeEntryRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("TimeEntry", id)))
    }
}

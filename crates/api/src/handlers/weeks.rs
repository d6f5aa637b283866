//! Handlers for the `/weeks` resource.
//!
//! Weeks are keyed by their start date, e.g. `/weeks/2026-01-05`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hours_core::error::CoreError;
use hours_core::types::Date;
use hours_core::week::{derive_week, DerivedWeek};
use hours_db::models::week::{CreateWeek, UpdateWeek, Week, WeekFilter};
use hours_db::repositories::WeekRepo;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/weeks
///
/// A second create for the same `week_start` is a conflict (409).
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateWeek>,
) -> AppResult<(StatusCode, Json<Week>)> {
    let week = input.resolve();
    let created = WeekRepo::create(&state.pool, &week)
        .await
        .map_err(|err| {
            if is_unique_violation(&err, WeekRepo::PRIMARY_KEY) {
                AppError::Core(CoreError::Conflict(format!(
                    "Week starting {} already exists",
                    week.week_start
                )))
            } else {
                AppError::Database(err)
            }
        })?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/weeks/{week_start}/ensure
///
/// Returns the week, inserting the implied row first if it is missing. An
/// existing week is returned as stored.
pub async fn ensure(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(week_start): Path<Date>,
) -> AppResult<Json<Week>> {
    let week = WeekRepo::ensure(&state.pool, week_start).await?;
    Ok(Json(week))
}

/// GET /api/v1/weeks?year_number=&week_number=&is_split_month=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<WeekFilter>,
) -> AppResult<Json<Vec<Week>>> {
    let weeks = WeekRepo::list(&state.pool, &filter).await?;
    Ok(Json(weeks))
}

/// GET /api/v1/weeks/{week_start}
pub async fn get_by_start(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(week_start): Path<Date>,
) -> AppResult<Json<Week>> {
    let week = WeekRepo::find_by_start(&state.pool, week_start)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Week", week_start)))?;
    Ok(Json(week))
}

/// GET /api/v1/weeks/{week_start}/derived
///
/// Preview of every value derivable from the start date. Never writes.
pub async fn derived(_user: AuthUser, Path(week_start): Path<Date>) -> Json<DerivedWeek> {
    Json(derive_week(week_start))
}

/// PUT /api/v1/weeks/{week_start}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(week_start): Path<Date>,
    Json(input): Json<UpdateWeek>,
) -> AppResult<Json<Week>> {
    let week = WeekRepo::update(&state.pool, week_start, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Week", week_start)))?;
    Ok(Json(week))
}

/// DELETE /api/v1/weeks/{week_start}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(week_start): Path<Date>,
) -> AppResult<StatusCode> {
    if WeekRepo::delete(&state.pool, week_start).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Week", week_start)))
    }
}

//! Handlers for the `/employees` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hours_core::error::CoreError;
use hours_core::types::DbId;
use hours_db::models::employee::{CreateEmployee, Employee, UpdateEmployee};
use hours_db::repositories::EmployeeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn validate(input: &impl Validate) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}

/// POST /api/v1/employees
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    validate(&input)?;
    let employee = EmployeeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// GET /api/v1/employees
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Employee>>> {
    let employees = EmployeeRepo::list(&state.pool).await?;
    Ok(Json(employees))
}

/// GET /api/v1/employees/me
///
/// The employee record matching the caller's e-mail address, created on
/// first use.
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Employee>> {
    let email = user.identity.email.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Caller identity carries no e-mail address".into(),
        ))
    })?;
    let employee =
        EmployeeRepo::get_or_create_by_email(&state.pool, email, &user.identity.fallback_name())
            .await?;
    Ok(Json(employee))
}

/// GET /api/v1/employees/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Employee>> {
    let employee = EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Employee", id)))?;
    Ok(Json(employee))
}

/// PUT /api/v1/employees/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEmployee>,
) -> AppResult<Json<Employee>> {
    validate(&input)?;
    let employee = EmployeeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Employee", id)))?;
    Ok(Json(employee))
}

/// DELETE /api/v1/employees/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EmployeeRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Employee", id)))
    }
}

//! Handlers for the `/assigned-projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hours_core::error::CoreError;
use hours_core::types::DbId;
use hours_db::models::assigned_project::{
    AssignedProject, AssignmentDetail, AssignmentFilter, BulkReplaceAssignments,
    CreateAssignedProject,
};
use hours_db::repositories::{AssignedProjectRepo, EmployeeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

async fn ensure_employee(state: &AppState, employee_id: DbId) -> AppResult<()> {
    EmployeeRepo::find_by_id(&state.pool, employee_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Employee", employee_id)))?;
    Ok(())
}

/// POST /api/v1/assigned-projects
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateAssignedProject>,
) -> AppResult<(StatusCode, Json<AssignedProject>)> {
    let assignment = AssignedProjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// GET /api/v1/assigned-projects?employee_id=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<AssignmentFilter>,
) -> AppResult<Json<Vec<AssignedProject>>> {
    let assignments = AssignedProjectRepo::list(&state.pool, &filter).await?;
    Ok(Json(assignments))
}

/// GET /api/v1/assigned-projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<AssignedProject>> {
    let assignment = AssignedProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("AssignedProject", id)))?;
    Ok(Json(assignment))
}

/// GET /api/v1/assigned-projects/employee/{employee_id}
///
/// The employee's assignments with project and client names.
pub async fn list_for_employee(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(employee_id): Path<DbId>,
) -> AppResult<Json<Vec<AssignmentDetail>>> {
    ensure_employee(&state, employee_id).await?;
    let details = AssignedProjectRepo::list_with_details(&state.pool, employee_id).await?;
    Ok(Json(details))
}

/// PUT /api/v1/assigned-projects/employee/{employee_id}/bulk
///
/// Replaces the employee's whole assignment set. An empty list clears it.
pub async fn bulk_replace(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(employee_id): Path<DbId>,
    Json(input): Json<BulkReplaceAssignments>,
) -> AppResult<Json<Vec<AssignedProject>>> {
    ensure_employee(&state, employee_id).await?;
    let assignments =
        AssignedProjectRepo::bulk_replace(&state.pool, employee_id, &input.assignments).await?;
    Ok(Json(assignments))
}

/// DELETE /api/v1/assigned-projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AssignedProjectRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("AssignedProject", id)))
    }
}

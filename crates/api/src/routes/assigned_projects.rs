//! Route definitions for the `/assigned-projects` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::assigned_projects;
use crate::state::AppState;

/// Routes mounted at `/assigned-projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// DELETE /{id}                              -> delete
/// GET    /employee/{employee_id}            -> list_for_employee
/// PUT    /employee/{employee_id}/bulk       -> bulk_replace
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(assigned_projects::list).post(assigned_projects::create),
        )
        .route(
            "/{id}",
            get(assigned_projects::get_by_id).delete(assigned_projects::delete),
        )
        .route(
            "/employee/{employee_id}",
            get(assigned_projects::list_for_employee),
        )
        .route(
            "/employee/{employee_id}/bulk",
            put(assigned_projects::bulk_replace),
        )
}

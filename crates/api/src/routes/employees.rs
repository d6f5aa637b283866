//! Route definitions for the `/employees` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::employees;
use crate::state::AppState;

/// Routes mounted at `/employees`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /me                                -> me
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employees::list).post(employees::create))
        .route("/me", get(employees::me))
        .route(
            "/{id}",
            get(employees::get_by_id)
                .put(employees::update)
                .delete(employees::delete),
        )
}

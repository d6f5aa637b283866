//! Route definitions for the `/time-entries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::time_entries;
use crate::state::AppState;

/// Routes mounted at `/time-entries`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /split-preview                     -> split_preview
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(time_entries::list).post(time_entries::create))
        .route("/split-preview", get(time_entries::split_preview))
        .route(
            "/{id}",
            get(time_entries::get_by_id)
                .put(time_entries::update)
                .delete(time_entries::delete),
        )
}

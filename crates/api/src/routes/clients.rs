//! Route definitions for the `/clients` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{primary_id}/{secondary_id}       -> get_by_ids
/// PUT    /{primary_id}/{secondary_id}       -> update
/// DELETE /{primary_id}/{secondary_id}       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list).post(clients::create))
        .route(
            "/{primary_id}/{secondary_id}",
            get(clients::get_by_ids)
                .put(clients::update)
                .delete(clients::delete),
        )
}

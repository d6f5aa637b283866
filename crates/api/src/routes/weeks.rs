//! Route definitions for the `/weeks` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::weeks;
use crate::state::AppState;

/// Routes mounted at `/weeks`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{week_start}                      -> get_by_start
/// PUT    /{week_start}                      -> update
/// DELETE /{week_start}                      -> delete
/// GET    /{week_start}/derived              -> derived (read-only preview)
/// PUT    /{week_start}/ensure               -> ensure (idempotent)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(weeks::list).post(weeks::create))
        .route(
            "/{week_start}",
            get(weeks::get_by_start)
                .put(weeks::update)
                .delete(weeks::delete),
        )
        .route("/{week_start}/derived", get(weeks::derived))
        .route("/{week_start}/ensure", put(weeks::ensure))
}

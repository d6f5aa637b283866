//! Route definitions for the `/invoices` and `/invoice-lines` resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{invoice_lines, invoices};
use crate::state::AppState;

/// Routes mounted at `/invoices`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id (with lines)
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// GET    /{id}/reconciliation               -> reconciliation
/// GET    /{id}/lines                        -> list_lines
/// POST   /{id}/lines                        -> create_line
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(invoices::list).post(invoices::create))
        .route(
            "/{id}",
            get(invoices::get_by_id)
                .put(invoices::update)
                .delete(invoices::delete),
        )
        .route("/{id}/reconciliation", get(invoices::reconciliation))
        .route(
            "/{id}/lines",
            get(invoices::list_lines).post(invoices::create_line),
        )
}

/// Routes mounted at `/invoice-lines`.
///
/// ```text
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// ```
pub fn line_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(invoice_lines::get_by_id)
            .put(invoice_lines::update)
            .delete(invoice_lines::delete),
    )
}

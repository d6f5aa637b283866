pub mod assigned_projects;
pub mod auth;
pub mod clients;
pub mod employees;
pub mod health;
pub mod invoices;
pub mod projects;
pub mod time_entries;
pub mod weeks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree. Every route requires an authenticated
/// caller.
///
/// Route hierarchy:
///
/// ```text
/// /auth/me                                         provision + return app user
///
/// /employees                                       list, create
/// /employees/me                                    get-or-create caller's employee
/// /employees/{id}                                  get, update, delete
///
/// /clients                                         list, create
/// /clients/{primary_id}/{secondary_id}             get, update, delete
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
///
/// /weeks                                           list, create
/// /weeks/{week_start}                              get, update, delete
/// /weeks/{week_start}/derived                      derived week preview (GET)
/// /weeks/{week_start}/ensure                       ensure week exists (PUT)
///
/// /time-entries                                    list, create
/// /time-entries/split-preview                      month allocation preview (GET)
/// /time-entries/{id}                               get, update, delete
///
/// /assigned-projects                               list, create
/// /assigned-projects/{id}                          get, delete
/// /assigned-projects/employee/{employee_id}        list with names (GET)
/// /assigned-projects/employee/{employee_id}/bulk   replace set (PUT)
///
/// /invoices                                        list, create (with lines)
/// /invoices/{id}                                   get (with lines), update, delete
/// /invoices/{id}/reconciliation                    header vs line totals (GET)
/// /invoices/{id}/lines                             list, create
/// /invoice-lines/{id}                              get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/employees", employees::router())
        .nest("/clients", clients::router())
        .nest("/projects", projects::router())
        .nest("/weeks", weeks::router())
        .nest("/time-entries", time_entries::router())
        .nest("/assigned-projects", assigned_projects::router())
        .nest("/invoices", invoices::router())
        .nest("/invoice-lines", invoices::line_router())
}

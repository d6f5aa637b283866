use std::sync::Arc;

use crate::auth::IdentityResolver;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hours_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Resolves the caller's identity from request headers.
    pub identity: Arc<dyn IdentityResolver>,
}

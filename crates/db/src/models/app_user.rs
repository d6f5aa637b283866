//! Identity-provider user model.

use hours_core::identity::Identity;
use hours_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `app_users` table. Provisioned on first sign-in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppUser {
    pub id: DbId,
    /// Identity-provider subject id (Azure `oid`).
    pub external_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for [`AppUserRepo::upsert`](crate::repositories::AppUserRepo::upsert).
#[derive(Debug, Clone)]
pub struct UpsertAppUser {
    pub external_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl From<&Identity> for UpsertAppUser {
    fn from(identity: &Identity) -> Self {
        Self {
            external_id: identity.subject.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
        }
    }
}

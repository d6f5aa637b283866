//! Repository for the `app_users` table.

use sqlx::PgPool;

use crate::models::app_user::{AppUser, UpsertAppUser};

const COLUMNS: &str = "\
    id, external_id, email, display_name, is_active, last_login_at, created_at, updated_at";

/// Provisions and looks up identity-provider users.
pub struct AppUserRepo;

impl AppUserRepo {
    /// Create the user on first sign-in, otherwise refresh it.
    ///
    /// On update, `email` and `display_name` are overwritten only when the
    /// identity carries them; `last_login_at` and `updated_at` always move
    /// to now.
    pub async fn upsert(pool: &PgPool, input: &UpsertAppUser) -> Result<AppUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO app_users (external_id, email, display_name, last_login_at)
             VALUES ($1, $2, $3, now())
             ON CONFLICT ON CONSTRAINT uq_app_users_external_id DO UPDATE SET
                email = COALESCE(EXCLUDED.email, app_users.email),
                display_name = COALESCE(EXCLUDED.display_name, app_users.display_name),
                last_login_at = now(),
                updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AppUser>(&query)
            .bind(&input.external_id)
            .bind(&input.email)
            .bind(&input.display_name)
            .fetch_one(pool)
            .await
    }
}

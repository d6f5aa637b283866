//! Repository for the `clients` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::client::{Client, ClientFilter, CreateClient, UpdateClient};

const COLUMNS: &str = "\
    primary_id, secondary_id, name, contact_name, contact_title, contact_email, \
    contact_phone, billing_address_line1, billing_address_line2, billing_city, \
    billing_state, billing_postal_code, billing_country, active";

/// Provides CRUD operations for clients, keyed by their identity pair.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a client. Missing ids are generated by the database.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients
                (primary_id, secondary_id, name, contact_name, contact_title, contact_email,
                 contact_phone, billing_address_line1, billing_address_line2, billing_city,
                 billing_state, billing_postal_code, billing_country, active)
             VALUES (COALESCE($1, gen_random_uuid()), COALESCE($2, gen_random_uuid()),
                     $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, COALESCE($14, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(input.primary_id)
            .bind(input.secondary_id)
            .bind(&input.name)
            .bind(&input.contact_name)
            .bind(&input.contact_title)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(&input.billing_address_line1)
            .bind(&input.billing_address_line2)
            .bind(&input.billing_city)
            .bind(&input.billing_state)
            .bind(&input.billing_postal_code)
            .bind(&input.billing_country)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_ids(
        pool: &PgPool,
        primary_id: Uuid,
        secondary_id: Uuid,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM clients WHERE primary_id = $1 AND secondary_id = $2");
        sqlx::query_as::<_, Client>(&query)
            .bind(primary_id)
            .bind(secondary_id)
            .fetch_optional(pool)
            .await
    }

    /// List clients by name, optionally only active or inactive ones.
    pub async fn list(pool: &PgPool, filter: &ClientFilter) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients
             WHERE ($1::BOOLEAN IS NULL OR active = $1)
             ORDER BY name, secondary_id"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(filter.active)
            .fetch_all(pool)
            .await
    }

    /// Apply a sparse update under a row lock. Returns `None` if the client
    /// does not exist.
    pub async fn update(
        pool: &PgPool,
        primary_id: Uuid,
        secondary_id: Uuid,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM clients
             WHERE primary_id = $1 AND secondary_id = $2
             FOR UPDATE"
        );
        let Some(mut client) = sqlx::query_as::<_, Client>(&query)
            .bind(primary_id)
            .bind(secondary_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        client.merge(input);

        let query = format!(
            "UPDATE clients SET
                name = $3, contact_name = $4, contact_title = $5, contact_email = $6,
                contact_phone = $7, billing_address_line1 = $8, billing_address_line2 = $9,
                billing_city = $10, billing_state = $11, billing_postal_code = $12,
                billing_country = $13, active = $14
             WHERE primary_id = $1 AND secondary_id = $2
             RETURNING {COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(client.primary_id)
            .bind(client.secondary_id)
            .bind(&client.name)
            .bind(&client.contact_name)
            .bind(&client.contact_title)
            .bind(&client.contact_email)
            .bind(&client.contact_phone)
            .bind(&client.billing_address_line1)
            .bind(&client.billing_address_line2)
            .bind(&client.billing_city)
            .bind(&client.billing_state)
            .bind(&client.billing_postal_code)
            .bind(&client.billing_country)
            .bind(client.active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(client))
    }

    /// Delete a client. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        primary_id: Uuid,
        secondary_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE primary_id = $1 AND secondary_id = $2")
            .bind(primary_id)
            .bind(secondary_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

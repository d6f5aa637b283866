//! Repository for the `time_entries` table.

use hours_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::time_entry::{CreateTimeEntry, TimeEntry, TimeEntryFilter, UpdateTimeEntry};
use crate::repositories::filter::{BindValue, Conditions};
use crate::repositories::WeekRepo;

const COLUMNS: &str = "\
    id, employee_id, project_id, client_id, week_start, total_hours, billable, \
    location_type, location_value, is_split_month, month_a_hours, month_b_hours, \
    created_at";

/// Provides CRUD operations for time entries.
pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// Record a time entry, creating its week first if needed.
    ///
    /// The week insert and the entry insert share one transaction: if the
    /// entry cannot be written, a week created by this call is rolled back
    /// with it.
    pub async fn create(pool: &PgPool, input: &CreateTimeEntry) -> Result<TimeEntry, sqlx::Error> {
        let mut tx = pool.begin().await?;

        WeekRepo::ensure_exists(&mut *tx, input.week_start).await?;

        let query = format!(
            "INSERT INTO time_entries
                (employee_id, project_id, client_id, week_start, total_hours, billable,
                 location_type, location_value, is_split_month, month_a_hours, month_b_hours)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true), $7, $8, COALESCE($9, false), $10, $11)
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, TimeEntry>(&query)
            .bind(input.employee_id)
            .bind(input.project_id)
            .bind(input.client_id)
            .bind(input.week_start)
            .bind(input.total_hours)
            .bind(input.billable)
            .bind(&input.location_type)
            .bind(&input.location_value)
            .bind(input.is_split_month)
            .bind(input.month_a_hours)
            .bind(input.month_b_hours)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(entry)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_entries WHERE id = $1");
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List entries matching every supplied filter, ordered by week then id.
    pub async fn list(
        pool: &PgPool,
        filter: &TimeEntryFilter,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        let mut conditions = Conditions::new();
        conditions.eq("employee_id", filter.employee_id, BindValue::BigInt);
        conditions.eq("project_id", filter.project_id, BindValue::BigInt);
        conditions.eq("client_id", filter.client_id, BindValue::Uuid);
        conditions.eq("week_start", filter.week_start, BindValue::Date);
        conditions.push("week_start", ">=", filter.week_start_gte, BindValue::Date);
        conditions.push("week_start", "<=", filter.week_start_lte, BindValue::Date);

        let query = format!(
            "SELECT {COLUMNS} FROM time_entries {} ORDER BY week_start, id",
            conditions.where_clause()
        );
        conditions
            .bind(sqlx::query_as::<_, TimeEntry>(&query))
            .fetch_all(pool)
            .await
    }

    /// Apply a sparse update under a row lock.
    ///
    /// `check` sees the merged row while the lock is held; an error from it
    /// rolls the update back. Moving the entry to a different `week_start`
    /// ensures the new week in the same transaction. Returns `None` if the
    /// entry does not exist.
    pub async fn update<E, F>(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTimeEntry,
        check: F,
    ) -> Result<Option<TimeEntry>, E>
    where
        E: From<sqlx::Error>,
        F: FnOnce(&TimeEntry) -> Result<(), E>,
    {
        let mut tx = pool.begin().await?;

        let Some(mut entry) = Self::lock(&mut *tx, id).await? else {
            return Ok(None);
        };
        let previous_week = entry.week_start;
        entry.merge(input);
        check(&entry)?;

        if entry.week_start != previous_week {
            WeekRepo::ensure_exists(&mut *tx, entry.week_start).await?;
        }

        let query = format!(
            "UPDATE time_entries SET
                employee_id = $2, project_id = $3, client_id = $4, week_start = $5,
                total_hours = $6, billable = $7, location_type = $8, location_value = $9,
                is_split_month = $10, month_a_hours = $11, month_b_hours = $12
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, TimeEntry>(&query)
            .bind(entry.id)
            .bind(entry.employee_id)
            .bind(entry.project_id)
            .bind(entry.client_id)
            .bind(entry.week_start)
            .bind(entry.total_hours)
            .bind(entry.billable)
            .bind(&entry.location_type)
            .bind(&entry.location_value)
            .bind(entry.is_split_month)
            .bind(entry.month_a_hours)
            .bind(entry.month_b_hours)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(entry))
    }

    /// Delete an entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_entries WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }
}

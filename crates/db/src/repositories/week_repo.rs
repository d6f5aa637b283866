//! Repository for the `weeks` table.

use hours_core::types::Date;
use sqlx::{PgConnection, PgPool};

use crate::models::week::{UpdateWeek, Week, WeekFilter};
use crate::repositories::filter::{BindValue, Conditions};

const COLUMNS: &str = "\
    week_start, week_end, week_number, year_number, is_split_month, \
    month_a_key, month_b_key, qty_days_a, qty_days_b";

/// Provides CRUD operations for calendar weeks.
pub struct WeekRepo;

impl WeekRepo {
    /// Name of the `weeks` primary-key constraint.
    pub const PRIMARY_KEY: &'static str = "pk_weeks";

    /// Make sure a week keyed by `week_start` exists, inserting the implied
    /// row if it does not. An existing row is never modified.
    ///
    /// Runs on the caller's connection so that the insert belongs to the
    /// caller's transaction. This is a lookup followed by a plain insert:
    /// two transactions racing on the same new week surface as a
    /// primary-key violation on the loser. Returns `true` if a row was
    /// inserted.
    pub async fn ensure_exists(
        conn: &mut PgConnection,
        week_start: Date,
    ) -> Result<bool, sqlx::Error> {
        let existing =
            sqlx::query_scalar::<_, Date>("SELECT week_start FROM weeks WHERE week_start = $1")
                .bind(week_start)
                .fetch_optional(&mut *conn)
                .await?;
        if existing.is_some() {
            return Ok(false);
        }

        Self::insert(conn, &Week::implied(week_start)).await?;
        tracing::debug!(%week_start, "Created implied week");
        Ok(true)
    }

    /// [`ensure_exists`](Self::ensure_exists) in its own transaction, returning the row.
    pub async fn ensure(pool: &PgPool, week_start: Date) -> Result<Week, sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::ensure_exists(&mut *tx, week_start).await?;
        let query = format!("SELECT {COLUMNS} FROM weeks WHERE week_start = $1");
        let week = sqlx::query_as::<_, Week>(&query)
            .bind(week_start)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(week)
    }

    /// Insert a fully resolved week row.
    pub async fn create(pool: &PgPool, week: &Week) -> Result<Week, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut *conn, week).await
    }

    pub async fn find_by_start(
        pool: &PgPool,
        week_start: Date,
    ) -> Result<Option<Week>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM weeks WHERE week_start = $1");
        sqlx::query_as::<_, Week>(&query)
            .bind(week_start)
            .fetch_optional(pool)
            .await
    }

    /// List weeks matching all supplied filters, oldest first.
    pub async fn list(pool: &PgPool, filter: &WeekFilter) -> Result<Vec<Week>, sqlx::Error> {
        let mut conditions = Conditions::new();
        conditions.eq("year_number", filter.year_number, BindValue::Int);
        conditions.eq("week_number", filter.week_number, BindValue::Int);
        conditions.eq("is_split_month", filter.is_split_month, BindValue::Bool);

        let query = format!(
            "SELECT {COLUMNS} FROM weeks {} ORDER BY week_start",
            conditions.where_clause()
        );
        conditions
            .bind(sqlx::query_as::<_, Week>(&query))
            .fetch_all(pool)
            .await
    }

    /// Apply a sparse update. Returns `None` if the week does not exist.
    pub async fn update(
        pool: &PgPool,
        week_start: Date,
        input: &UpdateWeek,
    ) -> Result<Option<Week>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM weeks WHERE week_start = $1 FOR UPDATE");
        let Some(mut week) = sqlx::query_as::<_, Week>(&query)
            .bind(week_start)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        week.merge(input);

        let query = format!(
            "UPDATE weeks SET
                week_end = $2, week_number = $3, year_number = $4, is_split_month = $5,
                month_a_key = $6, month_b_key = $7, qty_days_a = $8, qty_days_b = $9
             WHERE week_start = $1
             RETURNING {COLUMNS}"
        );
        let week = sqlx::query_as::<_, Week>(&query)
            .bind(week.week_start)
            .bind(week.week_end)
            .bind(week.week_number)
            .bind(week.year_number)
            .bind(week.is_split_month)
            .bind(week.month_a_key)
            .bind(week.month_b_key)
            .bind(week.qty_days_a)
            .bind(week.qty_days_b)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(week))
    }

    /// Delete a week. Fails with a foreign-key violation while time entries
    /// still reference it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, week_start: Date) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM weeks WHERE week_start = $1")
            .bind(week_start)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert(conn: &mut PgConnection, week: &Week) -> Result<Week, sqlx::Error> {
        let query = format!(
            "INSERT INTO weeks ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Week>(&query)
            .bind(week.week_start)
            .bind(week.week_end)
            .bind(week.week_number)
            .bind(week.year_number)
            .bind(week.is_split_month)
            .bind(week.month_a_key)
            .bind(week.month_b_key)
            .bind(week.qty_days_a)
            .bind(week.qty_days_b)
            .fetch_one(&mut *conn)
            .await
    }
}

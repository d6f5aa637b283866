//! Repository for the `invoice_lines` table.

use hours_core::invoice::LineTotals;
use hours_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::invoice_line::{InvoiceLine, NewInvoiceLine, UpdateInvoiceLine};

const COLUMNS: &str = "\
    id, invoice_id, employee_id, project_id, role_title, hourly_rate, hours, \
    subtotal, discount, total";

/// Provides CRUD operations for invoice lines.
pub struct InvoiceLineRepo;

impl InvoiceLineRepo {
    /// The rate to snapshot onto a new line: the employee's current rate,
    /// else the project's. `None` when neither is set.
    pub async fn snapshot_rate(
        pool: &PgPool,
        employee_id: DbId,
        project_id: DbId,
    ) -> Result<Option<Decimal>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT COALESCE(
                (SELECT hourly_rate FROM employees WHERE id = $1),
                (SELECT hourly_rate FROM projects WHERE id = $2)
             )",
        )
        .bind(employee_id)
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    /// Add a line to an existing invoice. Header totals are left untouched.
    pub async fn create(
        pool: &PgPool,
        invoice_id: DbId,
        line: &NewInvoiceLine,
    ) -> Result<InvoiceLine, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut *conn, invoice_id, line).await
    }

    /// Insert on an open connection; used inside invoice creation.
    pub async fn insert(
        conn: &mut PgConnection,
        invoice_id: DbId,
        line: &NewInvoiceLine,
    ) -> Result<InvoiceLine, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoice_lines
                (invoice_id, employee_id, project_id, role_title, hourly_rate, hours,
                 subtotal, discount, total)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InvoiceLine>(&query)
            .bind(invoice_id)
            .bind(line.employee_id)
            .bind(line.project_id)
            .bind(&line.role_title)
            .bind(line.hourly_rate)
            .bind(line.hours)
            .bind(line.subtotal)
            .bind(line.discount)
            .bind(line.total)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<InvoiceLine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoice_lines WHERE id = $1");
        sqlx::query_as::<_, InvoiceLine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_invoice(
        pool: &PgPool,
        invoice_id: DbId,
    ) -> Result<Vec<InvoiceLine>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM invoice_lines WHERE invoice_id = $1 ORDER BY id");
        sqlx::query_as::<_, InvoiceLine>(&query)
            .bind(invoice_id)
            .fetch_all(pool)
            .await
    }

    /// Count and sums of `hours` / `total` over an invoice's lines.
    pub async fn totals(pool: &PgPool, invoice_id: DbId) -> Result<LineTotals, sqlx::Error> {
        let (count, hours, fees): (i64, Decimal, Decimal) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(hours), 0), COALESCE(SUM(total), 0)
             FROM invoice_lines WHERE invoice_id = $1",
        )
        .bind(invoice_id)
        .fetch_one(pool)
        .await?;

        Ok(LineTotals {
            line_count: usize::try_from(count).unwrap_or_default(),
            hours,
            fees,
        })
    }

    /// Apply a sparse update under a row lock. `check` sees the merged line
    /// before it is written; an error from it rolls the update back.
    /// Returns `None` if the line does not exist.
    pub async fn update<E, F>(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInvoiceLine,
        check: F,
    ) -> Result<Option<InvoiceLine>, E>
    where
        E: From<sqlx::Error>,
        F: FnOnce(&InvoiceLine) -> Result<(), E>,
    {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM invoice_lines WHERE id = $1 FOR UPDATE");
        let Some(mut line) = sqlx::query_as::<_, InvoiceLine>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        line.merge(input);
        check(&line)?;

        let query = format!(
            "UPDATE invoice_lines SET
                employee_id = $2, project_id = $3, role_title = $4, hourly_rate = $5,
                hours = $6, subtotal = $7, discount = $8, total = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let line = sqlx::query_as::<_, InvoiceLine>(&query)
            .bind(line.id)
            .bind(line.employee_id)
            .bind(line.project_id)
            .bind(&line.role_title)
            .bind(line.hourly_rate)
            .bind(line.hours)
            .bind(line.subtotal)
            .bind(line.discount)
            .bind(line.total)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(line))
    }

    /// Delete a line. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoice_lines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

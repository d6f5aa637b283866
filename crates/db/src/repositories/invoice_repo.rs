//! Repository for the `invoices` table.

use hours_core::invoice::{reconcile, Reconciliation};
use hours_core::types::DbId;
use sqlx::PgPool;

use crate::models::invoice::{CreateInvoice, Invoice, InvoiceFilter, InvoiceWithLines, UpdateInvoice};
use crate::models::invoice_line::NewInvoiceLine;
use crate::repositories::filter::{BindValue, Conditions};
use crate::repositories::InvoiceLineRepo;

const COLUMNS: &str = "\
    id, invoice_number, client_primary_id, client_secondary_id, period_start, \
    period_end, issue_date, total_hours, total_fees, currency, status, notes, created_at";

/// Provides CRUD operations for invoice headers.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert an invoice header and its resolved lines in one transaction.
    ///
    /// Header totals are stored exactly as supplied (or `0`); they are not
    /// derived from `lines`. `input.lines` is ignored in favour of `lines`,
    /// which must already carry snapshotted rates.
    pub async fn create_with_lines(
        pool: &PgPool,
        input: &CreateInvoice,
        lines: &[NewInvoiceLine],
    ) -> Result<InvoiceWithLines, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO invoices
                (invoice_number, client_primary_id, client_secondary_id, period_start,
                 period_end, issue_date, total_hours, total_fees, currency, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, 0),
                     COALESCE($9, 'USD'), COALESCE($10, 'draft'), $11)
             RETURNING {COLUMNS}"
        );
        let invoice = sqlx::query_as::<_, Invoice>(&query)
            .bind(&input.invoice_number)
            .bind(input.client_primary_id)
            .bind(input.client_secondary_id)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.issue_date)
            .bind(input.total_hours)
            .bind(input.total_fees)
            .bind(&input.currency)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let mut created = Vec::with_capacity(lines.len());
        for line in lines {
            created.push(InvoiceLineRepo::insert(&mut *tx, invoice.id, line).await?);
        }

        tx.commit().await?;
        Ok(InvoiceWithLines {
            invoice,
            lines: created,
        })
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// An invoice header together with its lines.
    pub async fn find_with_lines(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InvoiceWithLines>, sqlx::Error> {
        let Some(invoice) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let lines = InvoiceLineRepo::list_by_invoice(pool, id).await?;
        Ok(Some(InvoiceWithLines { invoice, lines }))
    }

    /// List invoices matching every supplied filter, newest period first.
    pub async fn list(pool: &PgPool, filter: &InvoiceFilter) -> Result<Vec<Invoice>, sqlx::Error> {
        let mut conditions = Conditions::new();
        conditions.eq("client_primary_id", filter.client_primary_id, BindValue::Uuid);
        conditions.eq("client_secondary_id", filter.client_secondary_id, BindValue::Uuid);
        conditions.eq("status", filter.status.clone(), BindValue::Text);
        conditions.push("period_start", ">=", filter.period_start, BindValue::Date);
        conditions.push("period_end", "<=", filter.period_end, BindValue::Date);

        let query = format!(
            "SELECT {COLUMNS} FROM invoices {} ORDER BY period_start DESC, id DESC",
            conditions.where_clause()
        );
        conditions
            .bind(sqlx::query_as::<_, Invoice>(&query))
            .fetch_all(pool)
            .await
    }

    /// Apply a sparse update under a row lock. Totals are written only when
    /// supplied. Returns `None` if the invoice does not exist.
    ///
    /// `check` receives the locked row and the merged row; an error from it
    /// rolls the update back.
    pub async fn update<E, F>(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInvoice,
        check: F,
    ) -> Result<Option<Invoice>, E>
    where
        E: From<sqlx::Error>,
        F: FnOnce(&Invoice, &Invoice) -> Result<(), E>,
    {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1 FOR UPDATE");
        let Some(mut invoice) = sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        let current = invoice.clone();
        invoice.merge(input);
        check(&current, &invoice)?;

        let query = format!(
            "UPDATE invoices SET
                invoice_number = $2, client_primary_id = $3, client_secondary_id = $4,
                period_start = $5, period_end = $6, issue_date = $7, total_hours = $8,
                total_fees = $9, currency = $10, status = $11, notes = $12
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let invoice = sqlx::query_as::<_, Invoice>(&query)
            .bind(invoice.id)
            .bind(&invoice.invoice_number)
            .bind(invoice.client_primary_id)
            .bind(invoice.client_secondary_id)
            .bind(invoice.period_start)
            .bind(invoice.period_end)
            .bind(invoice.issue_date)
            .bind(invoice.total_hours)
            .bind(invoice.total_fees)
            .bind(&invoice.currency)
            .bind(&invoice.status)
            .bind(&invoice.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(invoice))
    }

    /// Delete an invoice; its lines are removed by cascade. Returns `true`
    /// if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Compare the stored header totals with the sums over the lines.
    /// Read-only; returns `None` if the invoice does not exist.
    pub async fn reconcile(pool: &PgPool, id: DbId) -> Result<Option<Reconciliation>, sqlx::Error> {
        let Some(invoice) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let totals = InvoiceLineRepo::totals(pool, id).await?;
        Ok(Some(reconcile(
            invoice.total_hours,
            invoice.total_fees,
            &totals,
        )))
    }
}

//! Invoice header model and DTOs.

use hours_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::invoice_line::{CreateInvoiceLine, InvoiceLine};
use super::{apply, nullable};

/// A row from the `invoices` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub invoice_number: Option<String>,
    pub client_primary_id: Uuid,
    pub client_secondary_id: Uuid,
    pub period_start: Date,
    pub period_end: Date,
    pub issue_date: Date,
    /// Denormalized; not kept in sync with the lines.
    pub total_hours: Decimal,
    /// Denormalized; not kept in sync with the lines.
    pub total_fees: Decimal,
    pub currency: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

impl Invoice {
    pub fn merge(&mut self, patch: &UpdateInvoice) {
        apply(&mut self.invoice_number, &patch.invoice_number);
        apply(&mut self.client_primary_id, &patch.client_primary_id);
        apply(&mut self.client_secondary_id, &patch.client_secondary_id);
        apply(&mut self.period_start, &patch.period_start);
        apply(&mut self.period_end, &patch.period_end);
        apply(&mut self.issue_date, &patch.issue_date);
        apply(&mut self.total_hours, &patch.total_hours);
        apply(&mut self.total_fees, &patch.total_fees);
        apply(&mut self.currency, &patch.currency);
        apply(&mut self.status, &patch.status);
        apply(&mut self.notes, &patch.notes);
    }
}

/// An invoice header together with its lines.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceWithLines {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub lines: Vec<InvoiceLine>,
}

/// DTO for creating an invoice, optionally with its lines.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub invoice_number: Option<String>,
    pub client_primary_id: Uuid,
    pub client_secondary_id: Uuid,
    pub period_start: Date,
    pub period_end: Date,
    pub issue_date: Date,
    /// Defaults to `0` if omitted. Never derived from `lines`.
    pub total_hours: Option<Decimal>,
    /// Defaults to `0` if omitted. Never derived from `lines`.
    pub total_fees: Option<Decimal>,
    /// Defaults to `USD` if omitted.
    pub currency: Option<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub lines: Vec<CreateInvoiceLine>,
}

/// DTO for updating an invoice header. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInvoice {
    #[serde(default, deserialize_with = "nullable")]
    pub invoice_number: Option<Option<String>>,
    pub client_primary_id: Option<Uuid>,
    pub client_secondary_id: Option<Uuid>,
    pub period_start: Option<Date>,
    pub period_end: Option<Date>,
    pub issue_date: Option<Date>,
    pub total_hours: Option<Decimal>,
    pub total_fees: Option<Decimal>,
    pub currency: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

/// Filter parameters for listing invoices. Filters combine with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceFilter {
    pub client_primary_id: Option<Uuid>,
    pub client_secondary_id: Option<Uuid>,
    pub status: Option<String>,
    /// Invoices whose period starts on or after this date.
    pub period_start: Option<Date>,
    /// Invoices whose period ends on or before this date.
    pub period_end: Option<Date>,
}

//! Invoice line model and DTOs.

use hours_core::invoice::{line_subtotal, line_total};
use hours_core::types::DbId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{apply, nullable};

/// A row from the `invoice_lines` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct InvoiceLine {
    pub id: DbId,
    pub invoice_id: DbId,
    pub employee_id: DbId,
    pub project_id: DbId,
    pub role_title: Option<String>,
    /// Rate in effect when the line was created; later rate changes on the
    /// employee or project do not touch it.
    pub hourly_rate: Decimal,
    pub hours: Decimal,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl InvoiceLine {
    pub fn merge(&mut self, patch: &UpdateInvoiceLine) {
        apply(&mut self.employee_id, &patch.employee_id);
        apply(&mut self.project_id, &patch.project_id);
        apply(&mut self.role_title, &patch.role_title);
        apply(&mut self.hourly_rate, &patch.hourly_rate);
        apply(&mut self.hours, &patch.hours);
        apply(&mut self.subtotal, &patch.subtotal);
        apply(&mut self.discount, &patch.discount);
        apply(&mut self.total, &patch.total);
    }
}

/// DTO for an invoice line as submitted by a client.
///
/// `hourly_rate`, `subtotal` and `total` may be omitted; see
/// [`CreateInvoiceLine::resolve`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceLine {
    pub employee_id: DbId,
    pub project_id: DbId,
    pub role_title: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub hours: Decimal,
    pub subtotal: Option<Decimal>,
    /// Defaults to `0` if omitted.
    pub discount: Option<Decimal>,
    pub total: Option<Decimal>,
}

impl CreateInvoiceLine {
    /// Fill omitted amounts. `rate` is used only when the line has no
    /// `hourly_rate` of its own. Supplied values are kept as they are.
    pub fn resolve(&self, rate: Decimal) -> NewInvoiceLine {
        let hourly_rate = self.hourly_rate.unwrap_or(rate);
        let discount = self.discount.unwrap_or(Decimal::ZERO);
        let subtotal = self
            .subtotal
            .unwrap_or_else(|| line_subtotal(hourly_rate, self.hours));
        let total = self
            .total
            .unwrap_or_else(|| line_total(subtotal, discount));

        NewInvoiceLine {
            employee_id: self.employee_id,
            project_id: self.project_id,
            role_title: self.role_title.clone(),
            hourly_rate,
            hours: self.hours,
            subtotal,
            discount,
            total,
        }
    }
}

/// A fully resolved line, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoiceLine {
    pub employee_id: DbId,
    pub project_id: DbId,
    pub role_title: Option<String>,
    pub hourly_rate: Decimal,
    pub hours: Decimal,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl From<&InvoiceLine> for NewInvoiceLine {
    fn from(line: &InvoiceLine) -> Self {
        Self {
            employee_id: line.employee_id,
            project_id: line.project_id,
            role_title: line.role_title.clone(),
            hourly_rate: line.hourly_rate,
            hours: line.hours,
            subtotal: line.subtotal,
            discount: line.discount,
            total: line.total,
        }
    }
}

/// DTO for updating an invoice line. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInvoiceLine {
    pub employee_id: Option<DbId>,
    pub project_id: Option<DbId>,
    #[serde(default, deserialize_with = "nullable")]
    pub role_title: Option<Option<String>>,
    pub hourly_rate: Option<Decimal>,
    pub hours: Option<Decimal>,
    pub subtotal: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub total: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn draft(json: serde_json::Value) -> CreateInvoiceLine {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn resolve_fills_rate_subtotal_and_total() {
        let line = draft(serde_json::json!({
            "employee_id": 1, "project_id": 2, "hours": "8", "discount": "50"
        }))
        .resolve(dec("95"));
        assert_eq!(line.hourly_rate, dec("95"));
        assert_eq!(line.subtotal, dec("760"));
        assert_eq!(line.total, dec("710"));
    }

    #[test]
    fn resolve_keeps_supplied_values() {
        let line = draft(serde_json::json!({
            "employee_id": 1, "project_id": 2, "hourly_rate": "120",
            "hours": "8", "subtotal": "1000", "total": "999"
        }))
        .resolve(dec("95"));
        assert_eq!(line.hourly_rate, dec("120"));
        assert_eq!(line.subtotal, dec("1000"));
        assert_eq!(line.discount, Decimal::ZERO);
        assert_eq!(line.total, dec("999"));
    }

    #[test]
    fn merge_updates_only_present_fields() {
        let mut line = InvoiceLine {
            id: 1,
            invoice_id: 1,
            employee_id: 1,
            project_id: 1,
            role_title: Some("Engineer".into()),
            hourly_rate: dec("100"),
            hours: dec("8"),
            subtotal: dec("800"),
            discount: Decimal::ZERO,
            total: dec("800"),
        };
        let patch: UpdateInvoiceLine =
            serde_json::from_value(serde_json::json!({ "discount": "100", "total": "700" }))
                .unwrap();
        line.merge(&patch);
        assert_eq!(line.discount, dec("100"));
        assert_eq!(line.total, dec("700"));
        assert_eq!(line.subtotal, dec("800"));
        assert_eq!(line.role_title.as_deref(), Some("Engineer"));
    }
}

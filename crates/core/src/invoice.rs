//! Invoice status values, line arithmetic, and header reconciliation.
//!
//! Invoice headers carry denormalized `total_hours` / `total_fees`. The
//! store never recomputes them from the lines; [`reconcile`] reports how far
//! they have drifted so callers can decide what to do.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::CoreError;

/// Decimal places kept for money amounts (`NUMERIC(12,2)`).
pub const MONEY_SCALE: u32 = 2;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_SENT: &str = "sent";
pub const STATUS_PAID: &str = "paid";
pub const STATUS_VOID: &str = "void";

/// Known invoice statuses.
///
/// The `status` column itself is free text; this enum only exists for the
/// strict-mode transition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Void,
}

impl InvoiceStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            STATUS_DRAFT => Some(Self::Draft),
            STATUS_SENT => Some(Self::Sent),
            STATUS_PAID => Some(Self::Paid),
            STATUS_VOID => Some(Self::Void),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Sent => STATUS_SENT,
            Self::Paid => STATUS_PAID,
            Self::Void => STATUS_VOID,
        }
    }

    /// `draft -> sent -> paid`, with `void` reachable from any unpaid state.
    /// Staying in the same state is always allowed.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Draft, Self::Sent)
                | (Self::Sent, Self::Paid)
                | (Self::Draft, Self::Void)
                | (Self::Sent, Self::Void)
        )
    }
}

/// Parse a status, rejecting anything outside the known set.
pub fn check_status(value: &str) -> Result<InvoiceStatus, CoreError> {
    InvoiceStatus::parse(value)
        .ok_or_else(|| CoreError::Validation(format!("Unknown invoice status '{value}'")))
}

/// Check that `next` is a known status reachable from `current`.
pub fn check_status_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let to = check_status(next)?;
    // Rows written in lenient mode may hold arbitrary text; treat those as drafts.
    let from = InvoiceStatus::parse(current).unwrap_or(InvoiceStatus::Draft);

    if !from.can_transition_to(to) {
        return Err(CoreError::Validation(format!(
            "Invoice status cannot change from '{}' to '{}'",
            from.as_str(),
            to.as_str()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Line arithmetic
// ---------------------------------------------------------------------------

/// `hourly_rate * hours`, rounded to cents.
pub fn line_subtotal(hourly_rate: Decimal, hours: Decimal) -> Decimal {
    (hourly_rate * hours).round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// `subtotal - discount`.
pub fn line_total(subtotal: Decimal, discount: Decimal) -> Decimal {
    subtotal - discount
}

/// Reject negative rates, hours, or discounts. Applies in every invariant
/// mode.
pub fn validate_line_quantities(
    hourly_rate: Decimal,
    hours: Decimal,
    discount: Decimal,
) -> Result<(), CoreError> {
    for (field, value) in [
        ("hourly_rate", hourly_rate),
        ("hours", hours),
        ("discount", discount),
    ] {
        if value < Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "{field} must be >= 0, got {value}"
            )));
        }
    }
    Ok(())
}

/// Check a line's caller-supplied amounts against its rate and hours.
pub fn check_line_amounts(
    hourly_rate: Decimal,
    hours: Decimal,
    subtotal: Decimal,
    discount: Decimal,
    total: Decimal,
) -> Result<(), CoreError> {
    validate_line_quantities(hourly_rate, hours, discount)?;

    let expected_subtotal = line_subtotal(hourly_rate, hours);
    if subtotal != expected_subtotal {
        return Err(CoreError::Validation(format!(
            "subtotal {subtotal} does not match hourly_rate * hours ({expected_subtotal})"
        )));
    }
    if discount > subtotal {
        return Err(CoreError::Validation(format!(
            "discount {discount} exceeds subtotal {subtotal}"
        )));
    }
    let expected_total = line_total(subtotal, discount);
    if total != expected_total {
        return Err(CoreError::Validation(format!(
            "total {total} does not match subtotal - discount ({expected_total})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Header totals
// ---------------------------------------------------------------------------

/// Sums over a set of invoice lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineTotals {
    pub line_count: usize,
    pub hours: Decimal,
    pub fees: Decimal,
}

impl LineTotals {
    /// Add one line's `hours` and `total`.
    pub fn add(&mut self, hours: Decimal, total: Decimal) {
        self.line_count += 1;
        self.hours += hours;
        self.fees += total;
    }
}

/// Sum `(hours, total)` pairs.
pub fn sum_lines<I>(lines: I) -> LineTotals
where
    I: IntoIterator<Item = (Decimal, Decimal)>,
{
    let mut totals = LineTotals::default();
    for (hours, total) in lines {
        totals.add(hours, total);
    }
    totals
}

/// Stored header totals compared with the sums over the invoice's lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub stored_total_hours: Decimal,
    pub stored_total_fees: Decimal,
    pub line_count: usize,
    pub line_hours: Decimal,
    pub line_fees: Decimal,
    /// `line_hours - stored_total_hours`.
    pub hours_delta: Decimal,
    /// `line_fees - stored_total_fees`.
    pub fees_delta: Decimal,
    pub balanced: bool,
}

pub fn reconcile(stored_hours: Decimal, stored_fees: Decimal, lines: &LineTotals) -> Reconciliation {
    let hours_delta = lines.hours - stored_hours;
    let fees_delta = lines.fees - stored_fees;
    Reconciliation {
        stored_total_hours: stored_hours,
        stored_total_fees: stored_fees,
        line_count: lines.line_count,
        line_hours: lines.hours,
        line_fees: lines.fees,
        hours_delta,
        fees_delta,
        balanced: hours_delta.is_zero() && fees_delta.is_zero(),
    }
}

/// Check header totals against the sums over its lines.
pub fn check_invoice_totals(
    stored_hours: Decimal,
    stored_fees: Decimal,
    lines: &LineTotals,
) -> Result<(), CoreError> {
    let report = reconcile(stored_hours, stored_fees, lines);
    if report.balanced {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Invoice totals ({stored_hours} h, {stored_fees}) do not match its lines ({} h, {})",
        lines.hours, lines.fees
    )))
}

/// Billing periods must not end before they start.
pub fn check_period(
    period_start: chrono::NaiveDate,
    period_end: chrono::NaiveDate,
) -> Result<(), CoreError> {
    if period_end < period_start {
        return Err(CoreError::Validation(format!(
            "period_end {period_end} is before period_start {period_start}"
        )));
    }
    Ok(())
}

//! Calendar-week derivation and split-month hour allocation.
//!
//! A week record is keyed by its start date. Everything else about it
//! (end date, ISO week/year, whether its seven days straddle two calendar
//! months) can be derived from that date alone.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Offset from `week_start` to the default `week_end` (inclusive range of 7 days).
pub const WEEK_END_OFFSET_DAYS: i64 = 6;

/// Decimal places kept for hour quantities (`NUMERIC(6,2)`).
pub const HOURS_SCALE: u32 = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Calendar values derived from a week-start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekCalendar {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// ISO-8601 week number of `week_start`.
    pub week_number: i32,
    /// ISO-8601 week-based year of `week_start` (may differ from the calendar year).
    pub year_number: i32,
}

/// How a week's days divide between two calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSplit {
    /// Month number (1-12) containing `week_start`.
    pub month_a_key: i32,
    /// Month number (1-12) containing `week_end`.
    pub month_b_key: i32,
    pub qty_days_a: i32,
    pub qty_days_b: i32,
}

/// A fully derived week, including split-month fields.
///
/// Shape matches the persisted `weeks` row so it can be previewed by
/// clients and posted back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedWeek {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub week_number: i32,
    pub year_number: i32,
    pub is_split_month: bool,
    pub month_a_key: Option<i32>,
    pub month_b_key: Option<i32>,
    pub qty_days_a: Option<i32>,
    pub qty_days_b: Option<i32>,
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Default end of the week starting at `week_start`.
pub fn default_week_end(week_start: NaiveDate) -> NaiveDate {
    week_start + Duration::days(WEEK_END_OFFSET_DAYS)
}

/// ISO week number and ISO year of `date`, as `(week_number, year_number)`.
pub fn iso_week_of(date: NaiveDate) -> (i32, i32) {
    let iso = date.iso_week();
    // ISO week numbers are 1..=53, always representable.
    (iso.week() as i32, iso.year())
}

/// Calendar values for the week starting at `week_start`.
///
/// This is exactly what the ledger stores when it creates a week as a side
/// effect of recording a time entry.
pub fn calendar_for(week_start: NaiveDate) -> WeekCalendar {
    let (week_number, year_number) = iso_week_of(week_start);
    WeekCalendar {
        week_start,
        week_end: default_week_end(week_start),
        week_number,
        year_number,
    }
}

/// Split of the inclusive range `week_start..=week_end` across two months.
///
/// Returns `None` when both ends fall in the same calendar month. Ranges are
/// expected to be at most a few weeks long; any days past the first month
/// boundary are counted towards month B.
pub fn month_split(week_start: NaiveDate, week_end: NaiveDate) -> Option<MonthSplit> {
    if week_end < week_start {
        return None;
    }
    if week_start.year() == week_end.year() && week_start.month() == week_end.month() {
        return None;
    }

    let first_of_b = first_day_of_next_month(week_start)?;
    let total_days = (week_end - week_start).num_days() + 1;
    let qty_days_a = (first_of_b - week_start).num_days();

    Some(MonthSplit {
        month_a_key: week_start.month() as i32,
        month_b_key: week_end.month() as i32,
        qty_days_a: qty_days_a as i32,
        qty_days_b: (total_days - qty_days_a) as i32,
    })
}

/// Full derivation for `week_start`, split-month fields included.
pub fn derive_week(week_start: NaiveDate) -> DerivedWeek {
    let calendar = calendar_for(week_start);
    let split = month_split(calendar.week_start, calendar.week_end);

    DerivedWeek {
        week_start: calendar.week_start,
        week_end: calendar.week_end,
        week_number: calendar.week_number,
        year_number: calendar.year_number,
        is_split_month: split.is_some(),
        month_a_key: split.map(|s| s.month_a_key),
        month_b_key: split.map(|s| s.month_b_key),
        qty_days_a: split.map(|s| s.qty_days_a),
        qty_days_b: split.map(|s| s.qty_days_b),
    }
}

fn first_day_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

// ---------------------------------------------------------------------------
// Hours
// ---------------------------------------------------------------------------

/// Reject negative hour quantities.
pub fn validate_hours(field: &str, hours: Decimal) -> Result<(), CoreError> {
    if hours < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "{field} must be >= 0, got {hours}"
        )));
    }
    Ok(())
}

/// Reject negative hours on a time entry: the total and whichever month
/// parts are present. Applies in every invariant mode.
pub fn validate_entry_hours(
    total_hours: Decimal,
    month_a_hours: Option<Decimal>,
    month_b_hours: Option<Decimal>,
) -> Result<(), CoreError> {
    validate_hours("total_hours", total_hours)?;
    if let Some(a) = month_a_hours {
        validate_hours("month_a_hours", a)?;
    }
    if let Some(b) = month_b_hours {
        validate_hours("month_b_hours", b)?;
    }
    Ok(())
}

/// Partition `total` hours between month A and month B in proportion to
/// their day counts.
///
/// Month A is rounded to two decimals (midpoint away from zero) and month B
/// receives the remainder, so the two parts always sum to `total` exactly.
pub fn allocate_split_hours(
    total: Decimal,
    qty_days_a: i32,
    qty_days_b: i32,
) -> Result<(Decimal, Decimal), CoreError> {
    validate_hours("total_hours", total)?;
    if qty_days_a < 0 || qty_days_b < 0 {
        return Err(CoreError::Validation(
            "Day counts must be non-negative".into(),
        ));
    }
    let days = qty_days_a + qty_days_b;
    if days == 0 {
        return Err(CoreError::Validation(
            "Cannot allocate hours across zero days".into(),
        ));
    }

    let month_a = (total * Decimal::from(qty_days_a) / Decimal::from(days))
        .round_dp_with_strategy(HOURS_SCALE, RoundingStrategy::MidpointAwayFromZero);
    Ok((month_a, total - month_a))
}

/// Check the split-month hours of a time entry against its total.
///
/// Entries that are not split-month always pass. Split-month entries must
/// carry both parts and the parts must sum to `total_hours`.
pub fn check_split_hours(
    total_hours: Decimal,
    is_split_month: bool,
    month_a_hours: Option<Decimal>,
    month_b_hours: Option<Decimal>,
) -> Result<(), CoreError> {
    if !is_split_month {
        return Ok(());
    }

    let (Some(a), Some(b)) = (month_a_hours, month_b_hours) else {
        return Err(CoreError::Validation(
            "Split-month entries require both month_a_hours and month_b_hours".into(),
        ));
    };
    validate_hours("month_a_hours", a)?;
    validate_hours("month_b_hours", b)?;

    if a + b != total_hours {
        return Err(CoreError::Validation(format!(
            "month_a_hours + month_b_hours ({}) must equal total_hours ({total_hours})",
            a + b
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // -- calendar_for --

    #[test]
    fn calendar_for_second_iso_week_of_2026() {
        let cal = calendar_for(date(2026, 1, 5));
        assert_eq!(cal.week_end, date(2026, 1, 11));
        assert_eq!(cal.week_number, 2);
        assert_eq!(cal.year_number, 2026);
    }

    #[test]
    fn iso_year_differs_from_calendar_year_at_boundary() {
        // 2025-12-29 is the Monday of ISO week 1 of 2026.
        assert_eq!(iso_week_of(date(2025, 12, 29)), (1, 2026));
        // 2027-01-01 is a Friday and still belongs to ISO week 53 of 2026.
        assert_eq!(iso_week_of(date(2027, 1, 1)), (53, 2026));
    }

    #[test]
    fn calendar_for_non_monday_start_uses_that_date() {
        let cal = calendar_for(date(2026, 3, 4));
        assert_eq!(cal.week_end, date(2026, 3, 10));
        assert_eq!(cal.week_number, 10);
    }

    // -- month_split --

    #[test]
    fn week_inside_one_month_is_not_split() {
        assert_eq!(month_split(date(2026, 3, 2), date(2026, 3, 8)), None);
    }

    #[test]
    fn week_crossing_month_boundary_is_split() {
        let split = month_split(date(2026, 3, 30), date(2026, 4, 5)).unwrap();
        assert_eq!(split.month_a_key, 3);
        assert_eq!(split.month_b_key, 4);
        assert_eq!(split.qty_days_a, 2);
        assert_eq!(split.qty_days_b, 5);
    }

    #[test]
    fn week_crossing_year_boundary_is_split() {
        let split = month_split(date(2025, 12, 29), date(2026, 1, 4)).unwrap();
        assert_eq!(split.month_a_key, 12);
        assert_eq!(split.month_b_key, 1);
        assert_eq!(split.qty_days_a, 3);
        assert_eq!(split.qty_days_b, 4);
    }

    #[test]
    fn week_ending_on_last_day_of_month_is_not_split() {
        // 2026-05-25 .. 2026-05-31
        assert_eq!(month_split(date(2026, 5, 25), date(2026, 5, 31)), None);
    }

    #[test]
    fn inverted_range_is_not_split() {
        assert_eq!(month_split(date(2026, 4, 5), date(2026, 3, 30)), None);
    }

    // -- derive_week --

    #[test]
    fn derive_week_fills_split_fields() {
        let week = derive_week(date(2026, 3, 30));
        assert!(week.is_split_month);
        assert_eq!(week.week_end, date(2026, 4, 5));
        assert_eq!(week.week_number, 14);
        assert_eq!(week.month_a_key, Some(3));
        assert_eq!(week.month_b_key, Some(4));
        assert_eq!(week.qty_days_a, Some(2));
        assert_eq!(week.qty_days_b, Some(5));
    }

    #[test]
    fn derive_week_leaves_split_fields_empty_for_plain_week() {
        let week = derive_week(date(2026, 3, 2));
        assert!(!week.is_split_month);
        assert_eq!(week.month_a_key, None);
        assert_eq!(week.qty_days_b, None);
    }

    // -- allocate_split_hours --

    #[test]
    fn allocation_sums_to_total() {
        let (a, b) = allocate_split_hours(dec("40"), 2, 5).unwrap();
        assert_eq!(a, dec("11.43"));
        assert_eq!(b, dec("28.57"));
        assert_eq!(a + b, dec("40"));
    }

    #[test]
    fn allocation_rounds_month_a_and_gives_remainder_to_b() {
        let (a, b) = allocate_split_hours(dec("10"), 3, 4).unwrap();
        assert_eq!(a, dec("4.29"));
        assert_eq!(b, dec("5.71"));
    }

    #[test]
    fn allocation_with_all_days_in_month_a() {
        let (a, b) = allocate_split_hours(dec("8.5"), 7, 0).unwrap();
        assert_eq!(a, dec("8.5"));
        assert!(b.is_zero());
    }

    #[test]
    fn allocation_rejects_zero_days() {
        assert_matches!(
            allocate_split_hours(dec("8"), 0, 0),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn allocation_rejects_negative_total() {
        assert_matches!(
            allocate_split_hours(dec("-1"), 2, 5),
            Err(CoreError::Validation(_))
        );
    }

    // -- check_split_hours --

    #[test]
    fn non_split_entry_always_passes() {
        assert!(check_split_hours(dec("8"), false, Some(dec("1")), None).is_ok());
    }

    #[test]
    fn split_entry_with_matching_parts_passes() {
        assert!(check_split_hours(dec("40.00"), true, Some(dec("16")), Some(dec("24"))).is_ok());
    }

    #[test]
    fn split_entry_with_mismatched_parts_fails() {
        assert_matches!(
            check_split_hours(dec("40"), true, Some(dec("16")), Some(dec("20"))),
            Err(CoreError::Validation(msg)) if msg.contains("must equal")
        );
    }

    #[test]
    fn split_entry_missing_a_part_fails() {
        assert_matches!(
            check_split_hours(dec("40"), true, Some(dec("40")), None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn validate_hours_accepts_zero() {
        assert!(validate_hours("total_hours", Decimal::ZERO).is_ok());
    }

    #[test]
    fn entry_hours_reject_negative_total_or_part() {
        assert!(validate_entry_hours(dec("40"), Some(dec("10")), None).is_ok());
        assert_matches!(
            validate_entry_hours(dec("-5"), None, None),
            Err(CoreError::Validation(msg)) if msg.starts_with("total_hours")
        );
        assert_matches!(
            validate_entry_hours(dec("5"), Some(dec("6")), Some(dec("-1"))),
            Err(CoreError::Validation(msg)) if msg.starts_with("month_b_hours")
        );
    }
}

//! Calendar week model and DTOs.

use hours_core::types::Date;
use hours_core::week::{calendar_for, DerivedWeek};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{apply, nullable};

/// A row from the `weeks` table, keyed by `week_start`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Week {
    pub week_start: Date,
    pub week_end: Date,
    pub week_number: i32,
    pub year_number: i32,
    pub is_split_month: bool,
    pub month_a_key: Option<i32>,
    pub month_b_key: Option<i32>,
    pub qty_days_a: Option<i32>,
    pub qty_days_b: Option<i32>,
}

impl Week {
    /// The row written when a week is created implicitly by recording a
    /// time entry: derived calendar values, no split-month fields.
    pub fn implied(week_start: Date) -> Self {
        let calendar = calendar_for(week_start);
        Self {
            week_start,
            week_end: calendar.week_end,
            week_number: calendar.week_number,
            year_number: calendar.year_number,
            is_split_month: false,
            month_a_key: None,
            month_b_key: None,
            qty_days_a: None,
            qty_days_b: None,
        }
    }

    /// Apply a sparse update. `week_start` is the key and never changes.
    pub fn merge(&mut self, patch: &UpdateWeek) {
        apply(&mut self.week_end, &patch.week_end);
        apply(&mut self.week_number, &patch.week_number);
        apply(&mut self.year_number, &patch.year_number);
        apply(&mut self.is_split_month, &patch.is_split_month);
        apply(&mut self.month_a_key, &patch.month_a_key);
        apply(&mut self.month_b_key, &patch.month_b_key);
        apply(&mut self.qty_days_a, &patch.qty_days_a);
        apply(&mut self.qty_days_b, &patch.qty_days_b);
    }
}

impl From<DerivedWeek> for Week {
    fn from(d: DerivedWeek) -> Self {
        Self {
            week_start: d.week_start,
            week_end: d.week_end,
            week_number: d.week_number,
            year_number: d.year_number,
            is_split_month: d.is_split_month,
            month_a_key: d.month_a_key,
            month_b_key: d.month_b_key,
            qty_days_a: d.qty_days_a,
            qty_days_b: d.qty_days_b,
        }
    }
}

/// DTO for creating a week explicitly.
///
/// Omitted calendar fields are derived from `week_start`; split-month fields
/// are stored exactly as given.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWeek {
    pub week_start: Date,
    pub week_end: Option<Date>,
    pub week_number: Option<i32>,
    pub year_number: Option<i32>,
    pub is_split_month: Option<bool>,
    pub month_a_key: Option<i32>,
    pub month_b_key: Option<i32>,
    pub qty_days_a: Option<i32>,
    pub qty_days_b: Option<i32>,
}

impl CreateWeek {
    /// Resolve defaults into the row to insert.
    pub fn resolve(&self) -> Week {
        let implied = Week::implied(self.week_start);
        Week {
            week_start: self.week_start,
            week_end: self.week_end.unwrap_or(implied.week_end),
            week_number: self.week_number.unwrap_or(implied.week_number),
            year_number: self.year_number.unwrap_or(implied.year_number),
            is_split_month: self.is_split_month.unwrap_or(false),
            month_a_key: self.month_a_key,
            month_b_key: self.month_b_key,
            qty_days_a: self.qty_days_a,
            qty_days_b: self.qty_days_b,
        }
    }
}

/// DTO for updating a week. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWeek {
    pub week_end: Option<Date>,
    pub week_number: Option<i32>,
    pub year_number: Option<i32>,
    pub is_split_month: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub month_a_key: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub month_b_key: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub qty_days_a: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub qty_days_b: Option<Option<i32>>,
}

/// Filter parameters for listing weeks. Filters combine with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeekFilter {
    pub year_number: Option<i32>,
    pub week_number: Option<i32>,
    pub is_split_month: Option<bool>,
}

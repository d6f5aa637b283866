//! Time entry model and DTOs.

use hours_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{apply, nullable};

/// A row from the `time_entries` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TimeEntry {
    pub id: DbId,
    pub employee_id: DbId,
    pub project_id: DbId,
    /// Client secondary id.
    pub client_id: Uuid,
    pub week_start: Date,
    pub total_hours: Decimal,
    pub billable: bool,
    pub location_type: String,
    pub location_value: Option<String>,
    pub is_split_month: bool,
    pub month_a_hours: Option<Decimal>,
    pub month_b_hours: Option<Decimal>,
    pub created_at: Timestamp,
}

impl TimeEntry {
    /// Apply a sparse update: only fields present in `patch` overwrite.
    pub fn merge(&mut self, patch: &UpdateTimeEntry) {
        apply(&mut self.employee_id, &patch.employee_id);
        apply(&mut self.project_id, &patch.project_id);
        apply(&mut self.client_id, &patch.client_id);
        apply(&mut self.week_start, &patch.week_start);
        apply(&mut self.total_hours, &patch.total_hours);
        apply(&mut self.billable, &patch.billable);
        apply(&mut self.location_type, &patch.location_type);
        apply(&mut self.location_value, &patch.location_value);
        apply(&mut self.is_split_month, &patch.is_split_month);
        apply(&mut self.month_a_hours, &patch.month_a_hours);
        apply(&mut self.month_b_hours, &patch.month_b_hours);
    }
}

/// DTO for recording a time entry.
///
/// Split-month fields are stored as given; nothing is recomputed server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeEntry {
    pub employee_id: DbId,
    pub project_id: DbId,
    pub client_id: Uuid,
    pub week_start: Date,
    pub total_hours: Decimal,
    /// Defaults to `true` if omitted.
    pub billable: Option<bool>,
    pub location_type: String,
    pub location_value: Option<String>,
    /// Defaults to `false` if omitted.
    pub is_split_month: Option<bool>,
    pub month_a_hours: Option<Decimal>,
    pub month_b_hours: Option<Decimal>,
}

/// DTO for updating a time entry. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTimeEntry {
    pub employee_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub client_id: Option<Uuid>,
    pub week_start: Option<Date>,
    pub total_hours: Option<Decimal>,
    pub billable: Option<bool>,
    pub location_type: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub location_value: Option<Option<String>>,
    pub is_split_month: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub month_a_hours: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub month_b_hours: Option<Option<Decimal>>,
}

/// Filter parameters for listing time entries. Filters combine with AND;
/// absent filters are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeEntryFilter {
    pub employee_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub client_id: Option<Uuid>,
    pub week_start: Option<Date>,
    pub week_start_gte: Option<Date>,
    pub week_start_lte: Option<Date>,
}

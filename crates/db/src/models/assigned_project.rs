//! Employee project assignment model and DTOs.

use hours_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `assigned_projects` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AssignedProject {
    pub id: DbId,
    pub employee_id: DbId,
    pub project_id: DbId,
    /// Client secondary id.
    pub client_id: Uuid,
    pub active: bool,
}

/// An assignment joined with its project and client names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentDetail {
    pub id: DbId,
    pub employee_id: DbId,
    pub project_id: DbId,
    pub project_name: String,
    pub client_id: Uuid,
    pub client_name: String,
    pub active: bool,
}

/// DTO for creating a single assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignedProject {
    pub employee_id: DbId,
    pub project_id: DbId,
    pub client_id: Uuid,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

/// One item of a bulk replacement. The employee comes from the request path
/// and every inserted row is active.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentItem {
    pub project_id: DbId,
    pub client_id: Uuid,
}

/// Body of a bulk replacement request.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkReplaceAssignments {
    pub assignments: Vec<AssignmentItem>,
}

/// Filter parameters for listing assignments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentFilter {
    pub employee_id: Option<DbId>,
}

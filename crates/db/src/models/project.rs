//! Project model and DTOs.

use hours_core::types::DbId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{apply, nullable};

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    /// Client secondary id.
    pub client_id: Uuid,
    pub name: String,
    pub billable_default: bool,
    pub hourly_rate: Option<Decimal>,
    pub active: bool,
}

impl Project {
    pub fn merge(&mut self, patch: &UpdateProject) {
        apply(&mut self.client_id, &patch.client_id);
        apply(&mut self.name, &patch.name);
        apply(&mut self.billable_default, &patch.billable_default);
        apply(&mut self.hourly_rate, &patch.hourly_rate);
        apply(&mut self.active, &patch.active);
    }
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub client_id: Uuid,
    pub name: String,
    /// Defaults to `true` if omitted.
    pub billable_default: Option<bool>,
    pub hourly_rate: Option<Decimal>,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

/// DTO for updating a project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub client_id: Option<Uuid>,
    pub name: Option<String>,
    pub billable_default: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub hourly_rate: Option<Option<Decimal>>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub client_id: Option<Uuid>,
    pub active: Option<bool>,
}

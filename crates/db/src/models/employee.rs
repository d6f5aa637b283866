//! Employee model and DTOs.

use hours_core::types::DbId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{apply, nullable};

/// Role assigned to employees created without one.
pub const DEFAULT_EMPLOYEE_ROLE: &str = "employee";

/// A row from the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub home_state: Option<String>,
    pub home_country: Option<String>,
    pub role: String,
    /// Current rate; copied onto invoice lines when they are created.
    pub hourly_rate: Option<Decimal>,
}

impl Employee {
    pub fn merge(&mut self, patch: &UpdateEmployee) {
        apply(&mut self.name, &patch.name);
        apply(&mut self.email, &patch.email);
        apply(&mut self.home_state, &patch.home_state);
        apply(&mut self.home_country, &patch.home_country);
        apply(&mut self.role, &patch.role);
        apply(&mut self.hourly_rate, &patch.hourly_rate);
    }
}

/// DTO for creating an employee.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid e-mail address"))]
    pub email: String,
    pub home_state: Option<String>,
    pub home_country: Option<String>,
    /// Defaults to `employee` if omitted.
    pub role: Option<String>,
    pub hourly_rate: Option<Decimal>,
}

/// DTO for updating an employee. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid e-mail address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub home_state: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub home_country: Option<Option<String>>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub hourly_rate: Option<Option<Decimal>>,
}

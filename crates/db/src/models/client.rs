//! Client model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{apply, nullable};

/// A row from the `clients` table, keyed by `(primary_id, secondary_id)`.
///
/// Projects, assignments and time entries reference `secondary_id` alone.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Client {
    pub primary_id: Uuid,
    pub secondary_id: Uuid,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub billing_address_line1: Option<String>,
    pub billing_address_line2: Option<String>,
    pub billing_city: Option<String>,
    pub billing_state: Option<String>,
    pub billing_postal_code: Option<String>,
    pub billing_country: Option<String>,
    pub active: bool,
}

impl Client {
    pub fn merge(&mut self, patch: &UpdateClient) {
        apply(&mut self.name, &patch.name);
        apply(&mut self.contact_name, &patch.contact_name);
        apply(&mut self.contact_title, &patch.contact_title);
        apply(&mut self.contact_email, &patch.contact_email);
        apply(&mut self.contact_phone, &patch.contact_phone);
        apply(&mut self.billing_address_line1, &patch.billing_address_line1);
        apply(&mut self.billing_address_line2, &patch.billing_address_line2);
        apply(&mut self.billing_city, &patch.billing_city);
        apply(&mut self.billing_state, &patch.billing_state);
        apply(&mut self.billing_postal_code, &patch.billing_postal_code);
        apply(&mut self.billing_country, &patch.billing_country);
        apply(&mut self.active, &patch.active);
    }
}

/// DTO for creating a client. Ids are generated by the database when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateClient {
    pub primary_id: Option<Uuid>,
    pub secondary_id: Option<Uuid>,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub billing_address_line1: Option<String>,
    pub billing_address_line2: Option<String>,
    pub billing_city: Option<String>,
    pub billing_state: Option<String>,
    pub billing_postal_code: Option<String>,
    pub billing_country: Option<String>,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

/// DTO for updating a client. The identity pair cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClient {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub billing_address_line1: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub billing_address_line2: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub billing_city: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub billing_state: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub billing_postal_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub billing_country: Option<Option<String>>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientFilter {
    pub active: Option<bool>,
}

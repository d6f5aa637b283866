//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, plus the
//!   entity's `merge` method that applies it
//! - A `Deserialize` filter struct for list endpoints, where the list is filterable
//!
//! Nullable columns use `Option<Option<T>>` in update DTOs so that an
//! explicit `null` clears the column while an absent key leaves it alone.

use serde::{Deserialize, Deserializer};

pub mod app_user;
pub mod assigned_project;
pub mod client;
pub mod employee;
pub mod invoice;
pub mod invoice_line;
pub mod project;
pub mod time_entry;
pub mod week;

/// Deserialize a present key into `Some(value)`, including `Some(None)` for
/// an explicit `null`. Pair with `#[serde(default)]` so an absent key stays
/// `None`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Overwrite `target` when the patch carries a value.
pub(crate) fn apply<T: Clone>(target: &mut T, patch: &Option<T>) {
    if let Some(value) = patch {
        *target = value.clone();
    }
}

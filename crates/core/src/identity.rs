//! Caller identity and identity-provider claim mapping.
//!
//! Identity providers disagree on claim names. Azure AD v2 tokens carry the
//! stable object id in `oid` and the sign-in name in `preferred_username`;
//! other issuers only set `sub` / `email` / `upn`. [`identity_from_claims`]
//! folds these into one [`Identity`].

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Claims tried, in order, for the subject id.
pub const SUBJECT_CLAIMS: [&str; 2] = ["oid", "sub"];

/// Claims tried, in order, for the e-mail address.
pub const EMAIL_CLAIMS: [&str; 3] = ["preferred_username", "email", "upn"];

/// Claim holding the human-readable name.
pub const NAME_CLAIM: &str = "name";

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Stable identity-provider subject id (stored as `app_users.external_id`).
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl Identity {
    /// Name to show for this caller: the display name, else the local part
    /// of the e-mail address, else the subject id.
    pub fn fallback_name(&self) -> String {
        if let Some(name) = &self.display_name {
            return name.clone();
        }
        if let Some(email) = &self.email {
            if let Some(local) = email.split('@').next().filter(|s| !s.is_empty()) {
                return local.to_string();
            }
        }
        self.subject.clone()
    }
}

/// Map a decoded token's claims to an [`Identity`].
///
/// Empty strings count as absent. A token with no subject claim is rejected.
pub fn identity_from_claims(claims: &Value) -> Result<Identity, CoreError> {
    let subject = first_claim(claims, &SUBJECT_CLAIMS)
        .ok_or_else(|| CoreError::Unauthorized("Token has no subject claim".into()))?;

    Ok(Identity {
        subject,
        email: first_claim(claims, &EMAIL_CLAIMS),
        display_name: first_claim(claims, &[NAME_CLAIM]),
    })
}

fn first_claim(claims: &Value, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        claims
            .get(*name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

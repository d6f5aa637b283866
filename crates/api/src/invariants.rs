//! Soft-invariant enforcement at the handler boundary.

use hours_core::error::CoreError;
use hours_core::invariants::InvariantMode;

use crate::error::AppResult;

/// Apply `mode` to the outcome of an invariant check.
///
/// Strict mode turns a violation into a 400 response. Lenient mode lets the
/// write proceed and logs the violation at WARN with `subject` for context.
pub fn enforce(mode: InvariantMode, subject: &str, check: Result<(), CoreError>) -> AppResult<()> {
    if let Some(violation) = mode.apply(check)? {
        tracing::warn!(subject, error = %violation, "Accepting write that violates a soft invariant");
    }
    Ok(())
}

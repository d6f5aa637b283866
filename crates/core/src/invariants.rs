//! How soft invariants are enforced.
//!
//! Split-month hours, invoice-line arithmetic and invoice header totals are
//! never guaranteed by the schema. In lenient mode a violation is accepted
//! and reported; in strict mode it is rejected as a validation error.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvariantMode {
    /// Accept violating writes.
    #[default]
    Lenient,
    /// Reject violating writes with [`CoreError::Validation`].
    Strict,
}

impl InvariantMode {
    /// Apply this mode to the outcome of an invariant check.
    ///
    /// Returns `Ok(None)` when the check passed, `Ok(Some(violation))` when it
    /// failed in lenient mode, and the error itself in strict mode.
    pub fn apply(self, check: Result<(), CoreError>) -> Result<Option<CoreError>, CoreError> {
        match (check, self) {
            (Ok(()), _) => Ok(None),
            (Err(violation), Self::Lenient) => Ok(Some(violation)),
            (Err(violation), Self::Strict) => Err(violation),
        }
    }
}

impl FromStr for InvariantMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(CoreError::Validation(format!(
                "Unknown invariant mode '{other}' (expected 'lenient' or 'strict')"
            ))),
        }
    }
}

impl fmt::Display for InvariantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_known_modes() {
        assert_eq!("lenient".parse::<InvariantMode>().unwrap(), InvariantMode::Lenient);
        assert_eq!(" STRICT ".parse::<InvariantMode>().unwrap(), InvariantMode::Strict);
        assert_matches!("loose".parse::<InvariantMode>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn default_is_lenient() {
        assert_eq!(InvariantMode::default(), InvariantMode::Lenient);
    }

    #[test]
    fn lenient_reports_violation() {
        let outcome = InvariantMode::Lenient
            .apply(Err(CoreError::Validation("bad".into())))
            .unwrap();
        assert_matches!(outcome, Some(CoreError::Validation(_)));
    }

    #[test]
    fn strict_rejects_violation() {
        assert_matches!(
            InvariantMode::Strict.apply(Err(CoreError::Validation("bad".into()))),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn passing_check_is_silent_in_both_modes() {
        assert_matches!(InvariantMode::Strict.apply(Ok(())), Ok(None));
        assert_matches!(InvariantMode::Lenient.apply(Ok(())), Ok(None));
    }
}

//! Ad account identifier normalization.
//!
//! The Graph API addresses ad accounts as `act_<digits>`. Input from flags
//! arrives in several shapes (bare id, upper/mixed-case prefix); everything
//! is canonicalized once here so the rest of the crate only ever sees the
//! lowercase-prefixed form.

use crate::errors::{AdsError, Result};
use std::fmt;

/// Canonical ad account identifier in `act_<id>` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId(String);

impl AccountId {
    /// Parse a raw account id into the canonical lowercase `act_` form.
    ///
    /// Accepts a bare id (`1234567890`) or any case variant of the prefix
    /// (`act_1234`, `ACT_1234`, `Act_1234`), always producing `act_1234`.
    /// Empty input is a configuration error.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AdsError::InvalidAccountId(
                "account id is empty".to_string(),
            ));
        }

        let has_prefix = trimmed
            .get(..4)
            .map_or(false, |p| p.eq_ignore_ascii_case("act_"));

        let canonical = if has_prefix {
            let rest = &trimmed[4..];
            if rest.is_empty() {
                return Err(AdsError::InvalidAccountId(
                    "account id has a prefix but no id".to_string(),
                ));
            }
            format!("act_{}", rest)
        } else {
            format!("act_{}", trimmed)
        };

        Ok(AccountId(canonical))
    }

    /// Canonical string form used in API paths.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

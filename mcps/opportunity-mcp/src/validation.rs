//! Input checks applied before any SQL is issued

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Number;

use crate::error::{OpportunityError, Result};

/// Row limit used when the caller does not pass one
pub const DEFAULT_LIST_LIMIT: u32 = 100;

// Local part may not start with a dot; domain needs a TLD of 2+ letters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-][A-Za-z0-9_'+\-.]*@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("Invalid email regex")
});

/// Check that `email` has a plausible address shape
pub fn validate_email(email: &str) -> Result<()> {
    let local = email.split('@').next().unwrap_or_default();
    let valid = EMAIL_REGEX.is_match(email) && !local.ends_with('.') && !email.contains("..");

    if valid {
        Ok(())
    } else {
        Err(OpportunityError::validation(
            "email",
            format!("'{}' is not a valid email address", email),
        ))
    }
}

/// Resolve an optional limit, applying the default and rejecting zero
pub fn check_limit(limit: Option<u32>) -> Result<u32> {
    match limit {
        None => Ok(DEFAULT_LIST_LIMIT),
        Some(0) => Err(OpportunityError::validation(
            "limit",
            "must be a positive integer",
        )),
        Some(n) => Ok(n),
    }
}

/// Turn a limit as it arrives over JSON into a row count
///
/// Accepts any positive integral number (`5` or `5.0`); rejects zero,
/// negatives, fractions and values beyond `u32::MAX`.
pub fn parse_limit(limit: Option<&Number>) -> Result<u32> {
    let Some(number) = limit else {
        return check_limit(None);
    };

    let invalid = || {
        OpportunityError::validation(
            "limit",
            format!("must be a positive integer, got {}", number),
        )
    };

    let value = if let Some(n) = number.as_u64() {
        n
    } else if number.is_i64() {
        return Err(invalid());
    } else {
        let f = number.as_f64().ok_or_else(invalid)?;
        if f.fract() != 0.0 || f < 1.0 || f > u32::MAX as f64 {
            return Err(invalid());
        }
        f as u64
    };

    let value = u32::try_from(value).map_err(|_| invalid())?;
    check_limit(Some(value))
}

//! Input validation helpers
//!
//! Centralized text length constants and validation functions for fields
//! that arrive outside the `validator`-derived DTOs.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Buyer / contact names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Short identifiers: phone numbers, external payment ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Lowercase and trim an email for storage / lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("  ", "order_id", MAX_SHORT_TEXT_LEN).is_err());
        assert!(validate_required_text("ORD_1", "order_id", MAX_SHORT_TEXT_LEN).is_ok());
    }

    #[test]
    fn rejects_overlong_optional_text() {
        let long = Some("x".repeat(MAX_NAME_LEN + 1));
        assert!(validate_optional_text(&long, "customer", MAX_NAME_LEN).is_err());
        assert!(validate_optional_text(&None, "customer", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn normalizes_email_case_and_whitespace() {
        assert_eq!(normalize_email("  Shopper@Example.COM "), "shopper@example.com");
    }
}

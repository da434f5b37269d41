//! Promo code validation.
//!
//! Codes map to whole-number discount percentages through a fixed table,
//! matched case-insensitively. One promo is active at a time; applying a
//! new code overwrites the previous discount.

use thiserror::Error;

/// The storefront's promo table.
pub const PROMO_CODES: &[(&str, u8)] = &[("SAVE10", 10), ("WELCOME20", 20), ("ICECREAM15", 15)];

/// Errors raised by promo validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromoError {
    /// The code is not in the promo table.
    #[error("invalid promo code {0:?}")]
    InvalidCode(String),

    /// The input was empty or whitespace.
    #[error("promo code cannot be empty")]
    Empty,
}

/// Validate a promo code, returning its discount percent.
///
/// Matching trims surrounding whitespace and ignores case, so `save10`
/// and `SAVE10` are the same code.
///
/// # Errors
///
/// Returns `PromoError::Empty` for blank input and
/// `PromoError::InvalidCode` for codes outside the table.
pub fn validate(code: &str) -> Result<u8, PromoError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(PromoError::Empty);
    }

    let normalized = trimmed.to_uppercase();
    PROMO_CODES
        .iter()
        .find(|(known, _)| *known == normalized)
        .map(|&(_, percent)| percent)
        .ok_or(PromoError::InvalidCode(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(validate("SAVE10"), Ok(10));
        assert_eq!(validate("WELCOME20"), Ok(20));
        assert_eq!(validate("ICECREAM15"), Ok(15));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(validate("save10"), Ok(10));
        assert_eq!(validate("IceCream15"), Ok(15));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(validate("  welcome20  "), Ok(20));
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        assert_eq!(
            validate("INVALID"),
            Err(PromoError::InvalidCode("INVALID".to_string()))
        );
    }

    #[test]
    fn test_blank_input_is_rejected() {
        assert_eq!(validate("   "), Err(PromoError::Empty));
    }
}

//! Length section - the mandatory minimum-length rule.

use secrecy::{ExposeSecret, SecretString};

use super::SectionResult;
use crate::types::MIN_LENGTH;

/// Length in Unicode scalar values, compared against [`MIN_LENGTH`].
pub fn meets_min_length(password: &str) -> bool {
    password.chars().count() >= MIN_LENGTH
}

/// Checks if the password meets minimum length requirements.
///
/// # Returns
/// - `Some(reason)` if password is too short
/// - `None` if password has sufficient length
pub fn length_section(password: &SecretString) -> SectionResult {
    if !meets_min_length(password.expose_secret()) {
        return Some(format!("Password must be at least {} characters", MIN_LENGTH));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_section_too_short() {
        let pwd = SecretString::new("Short1!".to_string().into());
        assert_eq!(
            length_section(&pwd),
            Some("Password must be at least 8 characters".to_string())
        );
    }

    #[test]
    fn test_length_section_exactly_minimum() {
        let pwd = SecretString::new("12345678".to_string().into());
        assert_eq!(length_section(&pwd), None);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 7 chars, 14 bytes
        assert!(!meets_min_length("ééééééé"));
        assert!(meets_min_length("éééééééé"));
    }
}

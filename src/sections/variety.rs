//! Character variety section - lowercase, uppercase, digits, special chars.

use secrecy::{ExposeSecret, SecretString};

use super::SectionResult;

pub fn has_lower(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

pub fn has_upper(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

pub fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

/// Anything outside `[A-Za-z0-9]`, including non-ASCII letters.
pub fn has_special(password: &str) -> bool {
    password.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Reports which advisory character classes are missing.
///
/// # Returns
/// - `Some(reason)` listing the missing classes
/// - `None` if every class is present
pub fn character_variety_section(password: &SecretString) -> SectionResult {
    let pwd = password.expose_secret();

    let missing: Vec<_> = [
        (has_upper(pwd), "uppercase"),
        (has_lower(pwd), "lowercase"),
        (has_digit(pwd), "numbers"),
        (has_special(pwd), "special characters"),
    ]
    .into_iter()
    .filter(|(present, _)| !present)
    .map(|(_, name)| name)
    .collect();

    if !missing.is_empty() {
        return Some(format!("Missing: {}", missing.join(", ")));
    }
    None
}

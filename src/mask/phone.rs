//! Phone numbers: national form in the field, E.164 on submit.

use super::{Mask, MaskError};

/// Dial code assumed for national input (Brazil).
pub const DEFAULT_DIAL_CODE: &str = "55";

/// Countries offered first, as dial codes.
const PREFERRED_DIAL_CODES: &[&str] = &["55", "1", "351", "54", "595"];

const E164_MAX_DIGITS: usize = 15;

/// Drops a pasted leading `+` so the field keeps the national form.
pub fn clean_national_input(input: &str) -> String {
    input.trim_start().trim_start_matches('+').to_string()
}

fn is_e164(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('+') else {
        return false;
    };
    (2..=E164_MAX_DIGITS).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

/// Normalizes a submitted number to E.164.
///
/// Spaces, dashes and parentheses are removed; a number without `+` is
/// taken as national and prefixed with `dial_code`. Empty input stays empty.
pub fn normalize_e164(raw: &str, dial_code: &str) -> Result<String, MaskError> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    if compact.is_empty() {
        return Ok(compact);
    }
    let e164 = if compact.starts_with('+') {
        compact
    } else {
        format!("+{dial_code}{compact}")
    };
    if is_e164(&e164) {
        Ok(e164)
    } else {
        Err(MaskError::InvalidPhone(raw.to_string()))
    }
}

/// A number split into dial code and national digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    pub dial_code: String,
    pub national: String,
}

impl PhoneNumber {
    pub fn new(dial_code: &str, national: &str) -> Self {
        Self {
            dial_code: dial_code.to_string(),
            national: national.chars().filter(char::is_ascii_digit).collect(),
        }
    }

    /// Splits an E.164 value on the longest preferred dial code.
    pub fn from_e164(value: &str) -> Result<Self, MaskError> {
        let invalid = || MaskError::InvalidPhone(value.to_string());
        if !is_e164(value) {
            return Err(invalid());
        }
        let digits = &value[1..];
        let dial_code = PREFERRED_DIAL_CODES
            .iter()
            .filter(|code| digits.starts_with(*code))
            .max_by_key(|code| code.len())
            .ok_or_else(invalid)?;
        Ok(Self::new(dial_code, &digits[dial_code.len()..]))
    }

    pub fn to_e164(&self) -> String {
        format!("+{}{}", self.dial_code, self.national)
    }

    /// Brazilian numbers need a 2-digit area code and 8 or 9 digits.
    pub fn is_valid(&self) -> bool {
        if !is_e164(&self.to_e164()) {
            return false;
        }
        match self.dial_code.as_str() {
            DEFAULT_DIAL_CODE => matches!(self.national.len(), 10 | 11),
            _ => true,
        }
    }

    /// National display form, e.g. `(11) 98765-4321` for Brazil.
    pub fn format_national(&self) -> String {
        match (self.dial_code.as_str(), self.national.len()) {
            (DEFAULT_DIAL_CODE, 11) => Mask::new("(00) 00000-0000").apply(&self.national),
            (DEFAULT_DIAL_CODE, 10) => Mask::new("(00) 0000-0000").apply(&self.national),
            _ => self.national.clone(),
        }
    }

    /// Hint under the field naming the submit destination.
    pub fn destination_hint(&self) -> Option<String> {
        self.is_valid().then(|| format!("Destination: {}", self.to_e164()))
    }
}

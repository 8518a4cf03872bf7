//! CAR receipt numbers: `UF-0000000-` followed by 32 letters or digits.

use super::{Mask, MaskError};

pub const CAR_MASK: &str = "AA-0000000-XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX";

fn car_mask() -> Mask {
    Mask::new(CAR_MASK).uppercase()
}

/// Formats typed input, uppercasing letters.
pub fn format_car(input: &str) -> String {
    car_mask().apply(input)
}

/// Normalizes a submitted receipt. Empty input stays empty.
///
/// Accepts the punctuated form or the 41 bare characters.
pub fn normalize_car(raw: &str) -> Result<String, MaskError> {
    let raw = raw.trim().to_ascii_uppercase();
    if raw.is_empty() {
        return Ok(raw);
    }
    let mask = car_mask();
    if mask.is_complete(&raw) {
        return Ok(raw);
    }

    let bare: String = raw.chars().filter(char::is_ascii_alphanumeric).collect();
    let formatted = mask.apply(&bare);
    if bare.len() == mask.unmask(&formatted).len() && mask.is_complete(&formatted) {
        return Ok(formatted);
    }
    Err(MaskError::InvalidCar(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0A1B2C3D4E5F6A7B8C9D0E1F2A3B4C5D";

    #[test]
    fn test_format_while_typing() {
        assert_eq!(format_car("pa15"), "PA-15");
        assert_eq!(format_car("pa1506187a"), "PA-1506187-A");
    }

    #[test]
    fn test_normalize_punctuated() {
        let value = format!("pa-1506187-{}", HASH.to_lowercase());
        assert_eq!(normalize_car(&value), Ok(format!("PA-1506187-{HASH}")));
    }

    #[test]
    fn test_normalize_bare() {
        let value = format!("PA1506187{HASH}");
        assert_eq!(normalize_car(&value), Ok(format!("PA-1506187-{HASH}")));
    }

    #[test]
    fn test_normalize_rejects() {
        assert_eq!(normalize_car("  "), Ok(String::new()));
        assert!(matches!(normalize_car("PA-15"), Err(MaskError::InvalidCar(_))));
        // a digit where the state code goes
        let value = format!("P11506187{HASH}");
        assert!(normalize_car(&value).is_err());
        // one character too many
        let value = format!("PA1506187{HASH}Z");
        assert!(normalize_car(&value).is_err());
    }
}

//! CPF/CNPJ document numbers.

use super::{Mask, MaskError};

const CPF_MASK: &str = "000.000.000-00";
const CNPJ_MASK: &str = "00.000.000/0000-00";
const CPF_DIGITS: usize = 11;
const CNPJ_DIGITS: usize = 14;

/// Field width that fits a punctuated CNPJ.
pub const MIN_DOCUMENT_FIELD_WIDTH: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Cpf,
    Cnpj,
}

impl DocumentKind {
    /// CNPJ once the input has more digits than a CPF.
    pub fn for_digits(digits: usize) -> Self {
        if digits > CPF_DIGITS { DocumentKind::Cnpj } else { DocumentKind::Cpf }
    }

    pub fn mask(self) -> Mask {
        match self {
            DocumentKind::Cpf => Mask::new(CPF_MASK),
            DocumentKind::Cnpj => Mask::new(CNPJ_MASK),
        }
    }
}

fn only_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Formats typed input with the CPF or CNPJ mask, switching on digit count.
pub fn format_document(input: &str) -> String {
    let digits = only_digits(input);
    DocumentKind::for_digits(digits.len()).mask().apply(&digits)
}

/// `maxlength` for a document field: at least wide enough for a CNPJ.
pub fn document_field_width(current: Option<usize>) -> usize {
    current
        .filter(|&w| w >= MIN_DOCUMENT_FIELD_WIDTH)
        .unwrap_or(MIN_DOCUMENT_FIELD_WIDTH)
}

fn all_same(nums: &[u32]) -> bool {
    nums.windows(2).all(|w| w[0] == w[1])
}

fn cpf_is_valid(nums: &[u32]) -> bool {
    if all_same(nums) {
        return false;
    }
    let check = |len: usize| {
        let sum: u32 = nums[..len]
            .iter()
            .zip((2..=len as u32 + 1).rev())
            .map(|(d, w)| d * w)
            .sum();
        match (sum * 10) % 11 {
            10 => 0,
            d => d,
        }
    };
    nums[9] == check(9) && nums[10] == check(10)
}

fn cnpj_is_valid(nums: &[u32]) -> bool {
    if all_same(nums) {
        return false;
    }
    const W1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const W2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    let check = |weights: &[u32]| {
        let sum: u32 = nums.iter().zip(weights).map(|(d, w)| d * w).sum();
        match 11 - sum % 11 {
            d if d >= 10 => 0,
            d => d,
        }
    };
    nums[12] == check(&W1) && nums[13] == check(&W2)
}

/// Validates check digits and returns the bare digits.
pub fn validate_document(input: &str) -> Result<(DocumentKind, String), MaskError> {
    let digits = only_digits(input);
    let nums: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    match nums.len() {
        CPF_DIGITS if cpf_is_valid(&nums) => Ok((DocumentKind::Cpf, digits)),
        CPF_DIGITS => Err(MaskError::InvalidCpf),
        CNPJ_DIGITS if cnpj_is_valid(&nums) => Ok((DocumentKind::Cnpj, digits)),
        CNPJ_DIGITS => Err(MaskError::InvalidCnpj),
        other => Err(MaskError::DocumentLength(other)),
    }
}

//! Input masks
//!
//! Pattern masks for typed values plus the document, CAR receipt, phone and
//! date formatters built on them.

mod car;
mod date;
mod document;
mod phone;

pub use car::{CAR_MASK, format_car, normalize_car};
pub use date::{DateRange, format_display_date, parse_display_date, to_submit_date};
pub use document::{
    DocumentKind, MIN_DOCUMENT_FIELD_WIDTH, document_field_width, format_document,
    validate_document,
};
pub use phone::{DEFAULT_DIAL_CODE, PhoneNumber, clean_national_input, normalize_e164};

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MaskError {
    #[error("Invalid CPF")]
    InvalidCpf,
    #[error("Invalid CNPJ")]
    InvalidCnpj,
    #[error("Expected a CPF (11 digits) or CNPJ (14 digits), got {0} digits")]
    DocumentLength(usize),
    #[error("Invalid CAR receipt: {0:?}")]
    InvalidCar(String),
    #[error("Invalid phone number: {0:?}")]
    InvalidPhone(String),
    #[error("Invalid date {0:?}")]
    InvalidDate(String),
    #[error("Due date {due} is before issue date {issue}")]
    DueBeforeIssue { issue: String, due: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Digit,
    Letter,
    Alnum,
    Literal(char),
}

impl Slot {
    fn accepts(self, c: char) -> bool {
        match self {
            Slot::Digit => c.is_ascii_digit(),
            Slot::Letter => c.is_ascii_alphabetic(),
            Slot::Alnum => c.is_ascii_alphanumeric(),
            Slot::Literal(_) => false,
        }
    }
}

/// A fixed-width pattern mask.
///
/// `0` takes a digit, `A` an ASCII letter, `X` an ASCII letter or digit;
/// any other character is a literal. Literals are only emitted ahead of an
/// accepted character, rejected characters are dropped and input beyond
/// the pattern is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    slots: Vec<Slot>,
    uppercase: bool,
}

impl Mask {
    pub fn new(pattern: &str) -> Self {
        let slots = pattern
            .chars()
            .map(|c| match c {
                '0' => Slot::Digit,
                'A' => Slot::Letter,
                'X' => Slot::Alnum,
                other => Slot::Literal(other),
            })
            .collect();
        Self {
            slots,
            uppercase: false,
        }
    }

    /// Uppercases input before matching.
    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    /// Full masked length.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn apply(&self, input: &str) -> String {
        let mut out = String::with_capacity(self.slots.len());
        let mut pos = 0;

        'input: for c in input.chars() {
            if pos >= self.slots.len() {
                break;
            }
            let c = if self.uppercase { c.to_ascii_uppercase() } else { c };

            let mut look = pos;
            let mut literals = String::new();
            while let Some(Slot::Literal(l)) = self.slots.get(look) {
                if *l == c {
                    out.push_str(&literals);
                    out.push(c);
                    pos = look + 1;
                    continue 'input;
                }
                literals.push(*l);
                look += 1;
            }

            if self.slots.get(look).is_some_and(|slot| slot.accepts(c)) {
                out.push_str(&literals);
                out.push(c);
                pos = look + 1;
            }
        }
        out
    }

    /// Characters of a masked value that fill placeholders.
    pub fn unmask(&self, masked: &str) -> String {
        self.slots
            .iter()
            .zip(masked.chars())
            .filter(|(slot, _)| !matches!(slot, Slot::Literal(_)))
            .map(|(_, c)| c)
            .collect()
    }

    /// True when every slot is filled.
    pub fn is_complete(&self, masked: &str) -> bool {
        masked.chars().count() == self.slots.len() && self.apply(masked) == masked
    }
}

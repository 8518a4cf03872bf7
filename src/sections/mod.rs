//! Password evaluation sections
//!
//! Each section analyzes a specific aspect of a password and may produce
//! one line of feedback.

mod length;
mod pattern;
mod variety;

pub use length::{length_section, meets_min_length};
pub use pattern::{CommonPattern, detect_common_pattern, pattern_analysis_section};
pub use variety::{character_variety_section, has_digit, has_lower, has_special, has_upper};

/// Result type for section evaluation functions.
/// - `Some(reason)` - Section failed with reason
/// - `None` - Section passed
pub type SectionResult = Option<String>;

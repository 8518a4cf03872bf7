//! Form assistance library
//!
//! Password policy evaluation for sign-up and password-change forms, with
//! a reactive form adapter, input masks and light/dark theme handling.
//!
//! # Features
//!
//! - `async` (default): Enables debounced evaluation with cancellation
//!   support and cross-context theme sync
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `FORM_ASSIST_WEAK_WORDS_PATH`: Custom path to an extra weak-word list
//!   (default: `./assets/weak-words.txt`)
//!
//! # Example
//!
//! ```rust,no_run
//! use form_assist::{evaluate_password, is_submit_eligible, check_match, Locale};
//! use secrecy::SecretString;
//!
//! // Optional: extend the built-in weak words (call once at startup)
//! let _ = form_assist::init_weak_words();
//!
//! let password = SecretString::new("Tr0ub4dor&3".to_string().into());
//! let evaluation = evaluate_password(&password);
//!
//! println!("Score: {}", evaluation.score);
//! println!("Strength: {}", evaluation.label(Locale::English));
//!
//! let matched = check_match("Tr0ub4dor&3", "Tr0ub4dor&3");
//! assert!(is_submit_eligible(&evaluation.rules, matched, true));
//! ```

// Internal modules
mod evaluator;
mod sections;
mod types;
mod weak_words;

pub mod binding;
pub mod mask;
pub mod theme;

// Public API
pub use evaluator::{
    check_match, classify, compute_score, evaluate_password, evaluate_rules, is_submit_eligible,
};
pub use sections::{CommonPattern, detect_common_pattern};
pub use types::{
    ColorClass, Locale, MIN_LENGTH, PasswordEvaluation, Rule, RuleSet, StrengthScore, StrengthTier,
};
pub use weak_words::{
    LOCALIZED_WEAK_WORDS, WEAK_WORDS_PATH_ENV, WeakWordsError, get_weak_words_path,
    init_weak_words, init_weak_words_from_path, is_weak_word, loaded_count,
};

#[cfg(feature = "async")]
pub use evaluator::evaluate_password_tx;

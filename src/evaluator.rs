//! Password policy evaluator - rules, score, tier and submit gating.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use std::time::Duration;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::sections::{
    SectionResult, character_variety_section, detect_common_pattern, has_digit, has_lower,
    has_special, has_upper, length_section, meets_min_length, pattern_analysis_section,
};
use crate::types::{PasswordEvaluation, RuleSet, StrengthScore, StrengthTier};

/// Length base: 5 points per character, up to 60.
const POINTS_PER_CHAR: i64 = 5;
const MAX_LENGTH_POINTS: i64 = 60;
/// Bonus for passwords of at least this length.
const LONG_LENGTH: usize = 12;
const LONG_BONUS: i64 = 5;
/// Per satisfied advisory rule.
const VARIETY_POINTS: i64 = 10;
/// Ceiling while the mandatory rule fails.
const SHORT_CAP: i64 = 35;
const PATTERN_PENALTY: i64 = 15;

/// Evaluates the five rule predicates.
pub fn evaluate_rules(password: &str) -> RuleSet {
    RuleSet {
        length: meets_min_length(password),
        lower: has_lower(password),
        upper: has_upper(password),
        digit: has_digit(password),
        special: has_special(password),
    }
}

fn score_with_penalty(password: &str, rules: &RuleSet, penalty: bool) -> StrengthScore {
    if password.is_empty() {
        return StrengthScore::new(0);
    }
    let len = password.chars().count();

    let mut score = (len as i64 * POINTS_PER_CHAR).min(MAX_LENGTH_POINTS);
    if len >= LONG_LENGTH {
        score += LONG_BONUS;
    }
    score += rules.variety_count() as i64 * VARIETY_POINTS;

    if !rules.length {
        score = score.min(SHORT_CAP);
    }
    if penalty {
        score -= PATTERN_PENALTY;
    }
    StrengthScore::new(score)
}

/// Computes the 0..=100 strength score.
///
/// The common-pattern penalty is applied after the short-password cap,
/// so a short password is never above 35.
pub fn compute_score(password: &str, rules: &RuleSet) -> StrengthScore {
    let penalty = detect_common_pattern(password).is_some();
    score_with_penalty(password, rules, penalty)
}

/// Maps a score to its tier.
///
/// Returns `None` for empty input. Every character falls in at least one
/// class, so a rule set with no class satisfied means an empty password,
/// whatever the score.
pub fn classify(score: StrengthScore, rules: &RuleSet) -> Option<StrengthTier> {
    if rules.variety_count() == 0 {
        return None;
    }
    let tier = match score.value() {
        _ if !rules.length => StrengthTier::TooShort,
        s if s < 50 => StrengthTier::Ok,
        s if s < 75 => StrengthTier::Good,
        s if s < 90 => StrengthTier::Strong,
        _ => StrengthTier::Excellent,
    };
    Some(tier)
}

/// True iff the confirmation is non-empty and identical to the password.
pub fn check_match(password: &str, confirmation: &str) -> bool {
    !confirmation.is_empty() && password == confirmation
}

/// Submit gating: the mandatory rule must pass, and a present, non-empty
/// confirmation must match.
pub fn is_submit_eligible(rules: &RuleSet, matched: bool, confirmation_present: bool) -> bool {
    rules.length && (!confirmation_present || matched)
}

/// Runs every rule, the score, tier and feedback sections in one pass.
pub fn evaluate_password(password: &SecretString) -> PasswordEvaluation {
    let pwd = password.expose_secret();
    let rules = evaluate_rules(pwd);

    let mut reasons = Vec::new();
    let mut pattern_penalty = false;

    // Orchestrator: execute sections in sequence
    let sections: [(&str, fn(&SecretString) -> SectionResult); 3] = [
        ("length", length_section),
        ("variety", character_variety_section),
        ("pattern", pattern_analysis_section),
    ];

    if !pwd.is_empty() {
        for (section_name, section_fn) in sections {
            if let Some(reason) = section_fn(password) {
                #[cfg(feature = "tracing")]
                tracing::trace!("section {} reported: {}", section_name, reason);
                pattern_penalty |= section_name == "pattern";
                reasons.push(reason);
            }
        }
    }

    let score = score_with_penalty(pwd, &rules, pattern_penalty);
    PasswordEvaluation {
        rules,
        score,
        tier: classify(score, &rules),
        pattern_penalty,
        reasons,
    }
}

/// Debounced evaluation that sends the result via channel.
///
/// Waits `delay`, then evaluates unless `token` was cancelled meanwhile.
/// A cancelled pass sends nothing.
#[cfg(feature = "async")]
pub async fn evaluate_password_tx(
    password: &SecretString,
    token: CancellationToken,
    delay: Duration,
    tx: mpsc::Sender<PasswordEvaluation>,
) {
    #[cfg(feature = "tracing")]
    tracing::debug!("evaluation scheduled in {:?}", delay);

    tokio::select! {
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::debug!("evaluation cancelled before start");
            return;
        }
        _ = tokio::time::sleep(delay) => {}
    }

    let evaluation = evaluate_password(password);

    if let Err(_e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}

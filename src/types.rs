//! Password policy data model.

use std::fmt;

/// Minimum length required by the mandatory rule.
pub const MIN_LENGTH: usize = 8;

/// Presentation language for labels and feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    BrazilianPortuguese,
}

impl Locale {
    /// Text shown instead of a tier while the field is empty.
    pub fn prompt(self) -> &'static str {
        match self {
            Locale::English => "Enter a password",
            Locale::BrazilianPortuguese => "Digite uma senha",
        }
    }

    /// Prefix of the strength text line.
    pub fn strength_prefix(self) -> &'static str {
        match self {
            Locale::English => "Password strength",
            Locale::BrazilianPortuguese => "Força da senha",
        }
    }

    pub fn sending(self) -> &'static str {
        match self {
            Locale::English => "Sending...",
            Locale::BrazilianPortuguese => "Enviando...",
        }
    }

    fn min_length_hint(self) -> &'static str {
        match self {
            Locale::English => "Password must be at least 8 characters",
            Locale::BrazilianPortuguese => "A senha deve ter pelo menos 8 caracteres",
        }
    }

    fn missing_prefix(self) -> &'static str {
        match self {
            Locale::English => "Missing",
            Locale::BrazilianPortuguese => "Faltando",
        }
    }

    fn common_pattern_hint(self) -> &'static str {
        match self {
            Locale::English => "Password contains common patterns",
            Locale::BrazilianPortuguese => "A senha contém padrões comuns",
        }
    }
}

/// A single password rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Length,
    Lower,
    Upper,
    Digit,
    Special,
}

impl Rule {
    /// All rules in display order.
    pub const ALL: [Rule; 5] = [
        Rule::Length,
        Rule::Lower,
        Rule::Upper,
        Rule::Digit,
        Rule::Special,
    ];

    /// Only the length rule gates submission; the rest are advisory.
    pub const fn is_mandatory(self) -> bool {
        matches!(self, Rule::Length)
    }

    /// Key used by requirement list items (`data-req="..."`).
    pub const fn key(self) -> &'static str {
        match self {
            Rule::Length => "length",
            Rule::Lower => "lower",
            Rule::Upper => "upper",
            Rule::Digit => "digit",
            Rule::Special => "special",
        }
    }
}

impl Rule {
    /// Name of the rule in requirement lists and feedback.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Rule::Length, Locale::English) => "at least 8 characters",
            (Rule::Lower, Locale::English) => "lowercase",
            (Rule::Upper, Locale::English) => "uppercase",
            (Rule::Digit, Locale::English) => "numbers",
            (Rule::Special, Locale::English) => "special characters",
            (Rule::Length, Locale::BrazilianPortuguese) => "pelo menos 8 caracteres",
            (Rule::Lower, Locale::BrazilianPortuguese) => "minúsculas",
            (Rule::Upper, Locale::BrazilianPortuguese) => "maiúsculas",
            (Rule::Digit, Locale::BrazilianPortuguese) => "números",
            (Rule::Special, Locale::BrazilianPortuguese) => "caracteres especiais",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Satisfaction of each rule for one password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleSet {
    pub length: bool,
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    pub special: bool,
}

impl RuleSet {
    pub fn get(&self, rule: Rule) -> bool {
        match rule {
            Rule::Length => self.length,
            Rule::Lower => self.lower,
            Rule::Upper => self.upper,
            Rule::Digit => self.digit,
            Rule::Special => self.special,
        }
    }

    /// Number of satisfied advisory rules (0..=4).
    pub fn variety_count(&self) -> usize {
        [self.lower, self.upper, self.digit, self.special]
            .iter()
            .filter(|&&b| b)
            .count()
    }

    /// `(rule, satisfied)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Rule, bool)> + '_ {
        Rule::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}

/// Strength score in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub const MAX: u8 = 100;

    /// Builds a score, clamping out-of-range values.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for StrengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presentation color class of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Danger,
    Warning,
    Info,
    Success,
}

impl ColorClass {
    /// CSS class applied to the strength bar.
    pub fn css_class(self) -> &'static str {
        match self {
            ColorClass::Danger => "bg-danger",
            ColorClass::Warning => "bg-warning",
            ColorClass::Info => "bg-info",
            ColorClass::Success => "bg-success",
        }
    }
}

/// Strength tier derived from score and the mandatory rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthTier {
    TooShort,
    Ok,
    Good,
    Strong,
    Excellent,
}

impl StrengthTier {
    pub fn color(self) -> ColorClass {
        match self {
            StrengthTier::TooShort => ColorClass::Danger,
            StrengthTier::Ok => ColorClass::Warning,
            StrengthTier::Good => ColorClass::Info,
            StrengthTier::Strong | StrengthTier::Excellent => ColorClass::Success,
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (StrengthTier::TooShort, Locale::English) => "Too short (min. 8)",
            (StrengthTier::Ok, Locale::English) => "Ok",
            (StrengthTier::Good, Locale::English) => "Good",
            (StrengthTier::Strong, Locale::English) => "Strong",
            (StrengthTier::Excellent, Locale::English) => "Excellent",
            (StrengthTier::TooShort, Locale::BrazilianPortuguese) => "Muito curta (mín. 8)",
            (StrengthTier::Ok, Locale::BrazilianPortuguese) => "Ok",
            (StrengthTier::Good, Locale::BrazilianPortuguese) => "Boa",
            (StrengthTier::Strong, Locale::BrazilianPortuguese) => "Forte",
            (StrengthTier::Excellent, Locale::BrazilianPortuguese) => "Excelente",
        }
    }
}

/// Result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordEvaluation {
    pub rules: RuleSet,
    pub score: StrengthScore,
    /// `None` while the input is empty.
    pub tier: Option<StrengthTier>,
    /// Whether the common-pattern penalty was applied.
    pub pattern_penalty: bool,
    /// Human-readable feedback, one entry per failing section.
    pub reasons: Vec<String>,
}

impl PasswordEvaluation {
    /// Tier label, or the empty-input prompt.
    pub fn label(&self, locale: Locale) -> &'static str {
        self.tier.map_or_else(|| locale.prompt(), |t| t.label(locale))
    }

    /// Bar color; an empty input is rendered as too short.
    pub fn color(&self) -> ColorClass {
        self.tier.map_or(ColorClass::Danger, StrengthTier::color)
    }

    /// Feedback lines in `locale`, empty while the input is empty.
    pub fn feedback(&self, locale: Locale) -> Vec<String> {
        let mut lines = Vec::new();
        if self.tier.is_none() {
            return lines;
        }
        if !self.rules.length {
            lines.push(locale.min_length_hint().to_string());
        }

        let missing: Vec<_> = [Rule::Upper, Rule::Lower, Rule::Digit, Rule::Special]
            .into_iter()
            .filter(|&rule| !self.rules.get(rule))
            .map(|rule| rule.label(locale))
            .collect();
        if !missing.is_empty() {
            lines.push(format!("{}: {}", locale.missing_prefix(), missing.join(", ")));
        }

        if self.pattern_penalty {
            lines.push(locale.common_pattern_hint().to_string());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamps() {
        assert_eq!(StrengthScore::new(-20).value(), 0);
        assert_eq!(StrengthScore::new(140).value(), 100);
        assert_eq!(StrengthScore::new(42).value(), 42);
    }

    #[test]
    fn test_only_length_is_mandatory() {
        let mandatory: Vec<_> = Rule::ALL.into_iter().filter(|r| r.is_mandatory()).collect();
        assert_eq!(mandatory, vec![Rule::Length]);
    }

    #[test]
    fn test_variety_count_ignores_length() {
        let rules = RuleSet {
            length: true,
            lower: true,
            upper: false,
            digit: true,
            special: false,
        };
        assert_eq!(rules.variety_count(), 2);
        let keys: Vec<_> = rules.iter().filter(|(_, ok)| *ok).map(|(r, _)| r.key()).collect();
        assert_eq!(keys, vec!["length", "lower", "digit"]);
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(StrengthTier::TooShort.color().css_class(), "bg-danger");
        assert_eq!(StrengthTier::Ok.color().css_class(), "bg-warning");
        assert_eq!(StrengthTier::Good.color().css_class(), "bg-info");
        assert_eq!(StrengthTier::Strong.color(), ColorClass::Success);
        assert_eq!(StrengthTier::Excellent.color(), ColorClass::Success);
    }

    #[test]
    fn test_localized_labels() {
        assert_eq!(StrengthTier::Good.label(Locale::BrazilianPortuguese), "Boa");
        assert_eq!(Locale::BrazilianPortuguese.prompt(), "Digite uma senha");
        assert_eq!(StrengthTier::Excellent.label(Locale::English), "Excellent");
    }

    #[test]
    fn test_feedback_follows_locale() {
        let evaluation = PasswordEvaluation {
            rules: RuleSet {
                length: false,
                lower: true,
                upper: false,
                digit: true,
                special: false,
            },
            score: StrengthScore::new(5),
            tier: Some(StrengthTier::TooShort),
            pattern_penalty: true,
            reasons: Vec::new(),
        };
        assert_eq!(
            evaluation.feedback(Locale::BrazilianPortuguese),
            vec![
                "A senha deve ter pelo menos 8 caracteres".to_string(),
                "Faltando: maiúsculas, caracteres especiais".to_string(),
                "A senha contém padrões comuns".to_string(),
            ]
        );
        assert_eq!(
            evaluation.feedback(Locale::English)[1],
            "Missing: uppercase, special characters"
        );
    }

    #[test]
    fn test_no_feedback_for_empty_input() {
        let evaluation = PasswordEvaluation {
            rules: RuleSet::default(),
            score: StrengthScore::default(),
            tier: None,
            pattern_penalty: false,
            reasons: Vec::new(),
        };
        assert!(evaluation.feedback(Locale::English).is_empty());
    }
}

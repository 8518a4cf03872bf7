//! Password form adapter - reacts to field changes and builds the view model.

use secrecy::{ExposeSecret, SecretString};

use super::observer::{Subscribers, Subscription};
use crate::evaluator::{check_match, evaluate_password, is_submit_eligible};
use crate::types::{Locale, PasswordEvaluation, Rule};

/// Explicit configuration handed to [`PasswordForm::setup`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FormConfig {
    pub locale: Locale,
    /// Whether the form has a confirmation field.
    pub has_confirmation: bool,
}

/// Type attribute of the password input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Password,
    Text,
}

impl InputKind {
    pub fn toggled(self) -> Self {
        match self {
            InputKind::Password => InputKind::Text,
            InputKind::Text => InputKind::Password,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Password => "password",
            InputKind::Text => "text",
        }
    }

    /// Icon of the visibility toggle button.
    pub fn icon_class(self) -> &'static str {
        match self {
            InputKind::Password => "bi-eye",
            InputKind::Text => "bi-eye-slash",
        }
    }
}

/// One entry of the requirement checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementItem {
    pub rule: Rule,
    pub satisfied: bool,
}

impl RequirementItem {
    pub fn text_class(&self) -> &'static str {
        if self.satisfied {
            "text-success"
        } else {
            "text-muted"
        }
    }

    pub fn icon_class(&self) -> &'static str {
        if self.satisfied {
            "bi-check-circle"
        } else {
            "bi-x-circle"
        }
    }
}

/// Everything the presentation layer needs after one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Bar width in percent, equal to the score.
    pub bar_width: u8,
    pub bar_class: String,
    pub aria_valuenow: String,
    pub strength_text: String,
    pub requirements: Vec<RequirementItem>,
    /// Confirmation matches; always `false` without a confirmation field.
    pub match_visible: bool,
    pub submit_disabled: bool,
    /// Submit label while submitting.
    pub submit_label: Option<&'static str>,
    /// Text for the live accessibility region.
    pub announcement: String,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new().into())
}

/// Reactive adapter around a password (and optional confirmation) field.
///
/// Created by [`PasswordForm::setup`] and released with
/// [`PasswordForm::teardown`]; every field change re-runs the evaluator
/// synchronously and notifies subscribers with a fresh [`FormView`].
#[derive(Debug)]
pub struct PasswordForm {
    config: FormConfig,
    password: SecretString,
    confirmation: SecretString,
    evaluation: PasswordEvaluation,
    input_kind: InputKind,
    caps_lock_visible: bool,
    submitting: bool,
    subscribers: Subscribers<FormView>,
}

impl PasswordForm {
    pub fn setup(config: FormConfig) -> Self {
        let password = empty_secret();
        let evaluation = evaluate_password(&password);

        #[cfg(feature = "tracing")]
        tracing::debug!(?config, "password form set up");

        Self {
            config,
            password,
            confirmation: empty_secret(),
            evaluation,
            input_kind: InputKind::default(),
            caps_lock_visible: false,
            submitting: false,
            subscribers: Subscribers::new(),
        }
    }

    /// Releases all observers. Returns how many were attached.
    pub fn teardown(mut self) -> usize {
        let count = self.subscribers.clear();

        #[cfg(feature = "tracing")]
        tracing::debug!("password form torn down, {} observers released", count);

        count
    }

    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&FormView) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.subscribers.unsubscribe(subscription)
    }

    /// Input event on the password field. `None` is treated as empty.
    pub fn set_password(&mut self, value: impl Into<Option<SecretString>>) -> FormView {
        self.password = value.into().unwrap_or_else(empty_secret);
        self.evaluation = evaluate_password(&self.password);
        self.publish()
    }

    /// Input event on the confirmation field. `None` is treated as empty.
    pub fn set_confirmation(&mut self, value: impl Into<Option<SecretString>>) -> FormView {
        self.confirmation = value.into().unwrap_or_else(empty_secret);
        self.publish()
    }

    pub fn evaluation(&self) -> &PasswordEvaluation {
        &self.evaluation
    }

    pub fn is_match(&self) -> bool {
        self.config.has_confirmation
            && check_match(self.password.expose_secret(), self.confirmation.expose_secret())
    }

    pub fn is_submit_eligible(&self) -> bool {
        let confirmation_present =
            self.config.has_confirmation && !self.confirmation.expose_secret().is_empty();
        is_submit_eligible(&self.evaluation.rules, self.is_match(), confirmation_present)
    }

    /// Flips the input between hidden and visible text.
    pub fn toggle_visibility(&mut self) -> InputKind {
        self.input_kind = self.input_kind.toggled();
        self.input_kind
    }

    pub fn input_kind(&self) -> InputKind {
        self.input_kind
    }

    /// Key event carrying the Caps Lock modifier state.
    pub fn key_event(&mut self, caps_lock_on: bool) -> bool {
        self.caps_lock_visible = caps_lock_on;
        self.caps_lock_visible
    }

    /// The field lost focus; the Caps Lock warning is hidden.
    pub fn blur(&mut self) {
        self.caps_lock_visible = false;
    }

    pub fn caps_lock_visible(&self) -> bool {
        self.caps_lock_visible
    }

    /// Starts submission if the form is eligible.
    ///
    /// The submit control stays disabled afterwards, showing the
    /// "sending" label.
    pub fn submit(&mut self) -> bool {
        if self.submitting || !self.is_submit_eligible() {
            return false;
        }
        self.submitting = true;

        #[cfg(feature = "tracing")]
        tracing::debug!("password form submitted");

        self.publish();
        true
    }

    /// Builds the view for the current state.
    pub fn view(&self) -> FormView {
        let locale = self.config.locale;
        let evaluation = &self.evaluation;
        let score = evaluation.score.value();
        let label = evaluation.label(locale);

        let strength_text = format!("{}: {}", locale.strength_prefix(), label);
        let mut announcement = strength_text.clone();
        let feedback = evaluation.feedback(locale);
        if !feedback.is_empty() {
            announcement.push_str(". ");
            announcement.push_str(&feedback.join(". "));
        }

        FormView {
            bar_width: score,
            bar_class: format!("progress-bar {}", evaluation.color().css_class()),
            aria_valuenow: score.to_string(),
            strength_text,
            requirements: evaluation
                .rules
                .iter()
                .map(|(rule, satisfied)| RequirementItem { rule, satisfied })
                .collect(),
            match_visible: self.is_match(),
            submit_disabled: self.submitting || !self.is_submit_eligible(),
            submit_label: self.submitting.then(|| locale.sending()),
            announcement,
        }
    }

    fn publish(&mut self) -> FormView {
        let view = self.view();
        self.subscribers.notify(&view);
        view
    }
}

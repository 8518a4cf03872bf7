//! Form binding adapter
//!
//! Keeps the evaluator pure and reflects its results into a view model that
//! a presentation layer renders. Observers subscribe to view updates.

mod form;
mod observer;

pub use form::{FormConfig, FormView, InputKind, PasswordForm, RequirementItem};
pub use observer::{Subscribers, Subscription};

//! A single validated form field

use serde_json::Value;

use super::rule::{first_failure, RuleRef};
use crate::i18n::Localizer;
use crate::reactive::{Observable, ReadOnly};

/// Observable state of one field.
///
/// Value, error and touched flag live in one cell so subscribers never see
/// a value paired with the error of a previous value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub value: Value,
    /// Message of the first failing rule, `None` when every rule passes
    pub error: Option<String>,
    /// Set by the first `set_value` since construction or reset
    pub touched: bool,
}

impl FieldState {
    fn pristine(value: Value) -> Self {
        Self {
            value,
            error: None,
            touched: false,
        }
    }
}

pub struct ValidationField {
    name: String,
    initial: Value,
    rules: Vec<RuleRef>,
    state: Observable<FieldState>,
}

impl ValidationField {
    pub(crate) fn new(name: String, initial: Value, rules: Vec<RuleRef>) -> Self {
        let state = Observable::new(FieldState::pristine(initial.clone()));
        Self {
            name,
            initial,
            rules,
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial(&self) -> &Value {
        &self.initial
    }

    pub fn rules(&self) -> &[RuleRef] {
        &self.rules
    }

    pub fn value(&self) -> Value {
        self.state.with(|s| s.value.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn is_touched(&self) -> bool {
        self.state.with(|s| s.touched)
    }

    pub fn state(&self) -> ReadOnly<FieldState> {
        self.state.read_only()
    }

    pub(crate) fn observable(&self) -> &Observable<FieldState> {
        &self.state
    }

    pub(crate) fn set_value(&self, value: Value, localizer: &dyn Localizer) {
        let error = first_failure(&self.rules, &value, localizer);
        self.state.set(FieldState {
            value,
            error,
            touched: true,
        });
    }

    /// Re-run the chain against the current value; touched is unchanged.
    pub(crate) fn revalidate(&self, localizer: &dyn Localizer) {
        let current = self.state.get();
        let error = first_failure(&self.rules, &current.value, localizer);
        self.state.set(FieldState { error, ..current });
    }

    pub(crate) fn reset(&self) {
        self.state.set(FieldState::pristine(self.initial.clone()));
    }
}

impl std::fmt::Debug for ValidationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationField")
            .field("name", &self.name)
            .field("initial", &self.initial)
            .field("rules", &self.rules.len())
            .field("state", &self.state.get())
            .finish()
    }
}

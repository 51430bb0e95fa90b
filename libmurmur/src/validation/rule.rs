//! Validation rules
//!
//! A rule inspects one raw value and either passes or fails with a message.
//! Rules hold only their configuration, so one instance can be shared by
//! any number of fields and schemas.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::i18n::{keys, Localizer};

/// JSON value kinds a [`TypeIs`] rule can require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl ValueKind {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Number => value.is_number(),
            ValueKind::Integer => value.is_i64() || value.is_u64(),
            ValueKind::Boolean => value.is_boolean(),
            ValueKind::Array => value.is_array(),
            ValueKind::Object => value.is_object(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Integer => "integer",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "list",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure text of a rule.
///
/// Keys are resolved each time the rule fails, against whatever language
/// the localizer has active at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Key {
        key: String,
        params: Vec<(String, String)>,
    },
    Literal(String),
}

impl Message {
    pub fn key(key: &str) -> Self {
        Message::Key {
            key: key.to_string(),
            params: Vec::new(),
        }
    }

    pub fn literal(text: &str) -> Self {
        Message::Literal(text.to_string())
    }

    /// Add an interpolation parameter. No effect on literals.
    pub fn with_param(mut self, name: &str, value: impl ToString) -> Self {
        if let Message::Key { params, .. } = &mut self {
            params.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub fn resolve(&self, localizer: &dyn Localizer) -> String {
        match self {
            Message::Literal(text) => text.clone(),
            Message::Key { key, params } => {
                let borrowed: Vec<(&str, &str)> = params
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str()))
                    .collect();
                localizer.translate(key, &borrowed)
            }
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Message::Key { key, .. } => key.trim().is_empty(),
            Message::Literal(text) => text.trim().is_empty(),
        }
    }
}

/// What a rule checks, for schema-level consistency checks and debugging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    MinLength(usize),
    MaxLength(usize),
    TypeIs(ValueKind),
    Custom,
}

/// A single constraint on a field value
pub trait Rule {
    /// `Err` carries the localized failure message.
    fn evaluate(&self, value: &Value, localizer: &dyn Localizer) -> Result<(), String>;

    fn kind(&self) -> RuleKind {
        RuleKind::Custom
    }

    fn message(&self) -> Option<&Message> {
        None
    }
}

/// Shared handle to a rule; chains are `Vec<RuleRef>`
pub type RuleRef = Rc<dyn Rule>;

/// Text length in Unicode scalar values, or element count for lists.
fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

pub(crate) fn blank_message(rule: &dyn Rule) -> bool {
    rule.message().map(Message::is_blank).unwrap_or(false)
}

/// Fails on null, blank text and empty lists.
#[derive(Debug, Clone)]
pub struct Required {
    message: Message,
}

impl Required {
    pub fn new() -> Self {
        Self {
            message: Message::key(keys::REQUIRED),
        }
    }

    pub fn with_message(message: Message) -> Self {
        Self { message }
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Required {
    fn evaluate(&self, value: &Value, localizer: &dyn Localizer) -> Result<(), String> {
        let present = match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        };
        if present {
            Ok(())
        } else {
            Err(self.message.resolve(localizer))
        }
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Required
    }

    fn message(&self) -> Option<&Message> {
        Some(&self.message)
    }
}

/// Fails when text or a list is shorter than `min`. Null passes.
#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
    message: Message,
}

impl MinLength {
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: Message::key(keys::MIN_LENGTH).with_param("min", min),
        }
    }

    pub fn with_message(min: usize, message: Message) -> Self {
        Self { min, message }
    }
}

impl Rule for MinLength {
    fn evaluate(&self, value: &Value, localizer: &dyn Localizer) -> Result<(), String> {
        match length_of(value) {
            Some(len) if len < self.min => Err(self.message.resolve(localizer)),
            _ => Ok(()),
        }
    }

    fn kind(&self) -> RuleKind {
        RuleKind::MinLength(self.min)
    }

    fn message(&self) -> Option<&Message> {
        Some(&self.message)
    }
}

/// Fails when text or a list is longer than `max`. Null passes.
#[derive(Debug, Clone)]
pub struct MaxLength {
    max: usize,
    message: Message,
}

impl MaxLength {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            message: Message::key(keys::MAX_LENGTH).with_param("max", max),
        }
    }

    pub fn with_message(max: usize, message: Message) -> Self {
        Self { max, message }
    }
}

impl Rule for MaxLength {
    fn evaluate(&self, value: &Value, localizer: &dyn Localizer) -> Result<(), String> {
        match length_of(value) {
            Some(len) if len > self.max => Err(self.message.resolve(localizer)),
            _ => Ok(()),
        }
    }

    fn kind(&self) -> RuleKind {
        RuleKind::MaxLength(self.max)
    }

    fn message(&self) -> Option<&Message> {
        Some(&self.message)
    }
}

/// Fails when a non-null value is of another kind.
#[derive(Debug, Clone)]
pub struct TypeIs {
    kind: ValueKind,
    message: Message,
}

impl TypeIs {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            message: Message::key(keys::TYPE_IS).with_param("kind", kind),
        }
    }

    pub fn with_message(kind: ValueKind, message: Message) -> Self {
        Self { kind, message }
    }
}

impl Rule for TypeIs {
    fn evaluate(&self, value: &Value, localizer: &dyn Localizer) -> Result<(), String> {
        if value.is_null() || self.kind.matches(value) {
            Ok(())
        } else {
            Err(self.message.resolve(localizer))
        }
    }

    fn kind(&self) -> RuleKind {
        RuleKind::TypeIs(self.kind)
    }

    fn message(&self) -> Option<&Message> {
        Some(&self.message)
    }
}

pub fn required() -> RuleRef {
    Rc::new(Required::new())
}

pub fn min_length(min: usize) -> RuleRef {
    Rc::new(MinLength::new(min))
}

pub fn max_length(max: usize) -> RuleRef {
    Rc::new(MaxLength::new(max))
}

pub fn type_is(kind: ValueKind) -> RuleRef {
    Rc::new(TypeIs::new(kind))
}

/// Run a chain in order and return the first failure, if any.
pub fn first_failure(
    rules: &[RuleRef],
    value: &Value,
    localizer: &dyn Localizer,
) -> Option<String> {
    for (index, rule) in rules.iter().enumerate() {
        if let Err(message) = rule.evaluate(value, localizer) {
            tracing::trace!(index, kind = ?rule.kind(), "Rule failed");
            return Some(message);
        }
    }
    None
}

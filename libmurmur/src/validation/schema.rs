//! Schema validator: a fixed set of named fields with rule chains.

use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use serde_json::Value;

use super::field::{FieldState, ValidationField};
use super::rule::{blank_message, RuleKind, RuleRef};
use crate::error::SchemaError;
use crate::i18n::Localizer;
use crate::reactive::{BatchScope, Computed, Observable, ReadOnly};

/// Validated fields for one editing session (a composer, a profile form).
///
/// Fields keep their declaration order. Setting a field re-runs only that
/// field's rules; the aggregate validity is derived on every read.
pub struct Schema {
    fields: Vec<ValidationField>,
    localizer: Rc<dyn Localizer>,
}

impl Schema {
    pub fn builder(localizer: Rc<dyn Localizer>) -> SchemaBuilder {
        SchemaBuilder {
            localizer,
            fields: Vec::new(),
        }
    }

    fn find(&self, name: &str) -> Result<&ValidationField, SchemaError> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| SchemaError::UnknownField(name.to_string()))
    }

    /// Update a field's raw value and re-run its rule chain.
    ///
    /// Validation failures land in the field's error, never in the return
    /// value; the only error is naming a field the schema does not have.
    pub fn set_value(&self, name: &str, value: impl Into<Value>) -> Result<(), SchemaError> {
        let field = self.find(name)?;
        field.set_value(value.into(), self.localizer.as_ref());
        tracing::trace!(field = name, error = ?field.error(), "Field updated");
        Ok(())
    }

    /// True iff no field currently carries an error.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|f| f.error().is_none())
    }

    /// Current messages keyed by field name; error-free fields are omitted.
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|f| f.error().map(|e| (f.name().to_string(), e)))
            .collect()
    }

    pub fn error(&self, name: &str) -> Result<Option<String>, SchemaError> {
        Ok(self.find(name)?.error())
    }

    pub fn value(&self, name: &str) -> Result<Value, SchemaError> {
        Ok(self.find(name)?.value())
    }

    pub fn is_touched(&self, name: &str) -> Result<bool, SchemaError> {
        Ok(self.find(name)?.is_touched())
    }

    /// Subscribe-able state of one field
    pub fn field(&self, name: &str) -> Result<ReadOnly<FieldState>, SchemaError> {
        Ok(self.find(name)?.state())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(ValidationField::name)
    }

    /// Whether any field has been edited since construction or reset
    pub fn is_dirty(&self) -> bool {
        self.fields.iter().any(ValidationField::is_touched)
    }

    /// Derived validity that follows every field.
    pub fn validity(&self) -> Computed<bool> {
        let states: Vec<Observable<FieldState>> =
            self.fields.iter().map(|f| f.observable().clone()).collect();
        Computed::from_all(&states, |all| {
            all.iter().all(|state| state.with(|s| s.error.is_none()))
        })
    }

    /// Evaluate every field's chain against its current value without
    /// marking anything touched. Used before submitting so untouched
    /// required fields surface their errors.
    pub fn validate_all(&self) -> bool {
        let _scope = BatchScope::new();
        for field in &self.fields {
            field.revalidate(self.localizer.as_ref());
        }
        self.is_valid()
    }

    /// Re-resolve the messages of fields that currently have an error,
    /// e.g. after the active language changed.
    pub fn refresh_messages(&self) {
        let _scope = BatchScope::new();
        for field in self.fields.iter().filter(|f| f.error().is_some()) {
            field.revalidate(self.localizer.as_ref());
        }
    }

    /// Restore every field to its initial value and clear errors and
    /// touched flags. Subscribers are notified after all fields are reset.
    pub fn reset(&self) {
        let _scope = BatchScope::new();
        for field in &self.fields {
            field.reset();
        }
        tracing::debug!(fields = self.fields.len(), "Schema reset");
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields)
            .field("language", &self.localizer.current_language())
            .finish()
    }
}

/// Declares fields in order, then checks the declaration as a whole.
pub struct SchemaBuilder {
    localizer: Rc<dyn Localizer>,
    fields: Vec<(String, Value, Vec<RuleRef>)>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: &str, initial: impl Into<Value>, rules: Vec<RuleRef>) -> Self {
        self.fields.push((name.to_string(), initial.into(), rules));
        self
    }

    /// Fails on empty or duplicate names, `max_length(0)`, a min length
    /// above a max length in the same chain, and blank rule messages.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut seen = HashSet::new();
        for (name, _, rules) in &self.fields {
            if name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateField(name.clone()));
            }
            check_chain(name, rules)?;
        }

        let fields = self
            .fields
            .into_iter()
            .map(|(name, initial, rules)| ValidationField::new(name, initial, rules))
            .collect::<Vec<_>>();
        tracing::debug!(fields = fields.len(), "Schema built");

        Ok(Schema {
            fields,
            localizer: self.localizer,
        })
    }
}

fn check_chain(field: &str, rules: &[RuleRef]) -> Result<(), SchemaError> {
    let mut min: Option<usize> = None;
    let mut max: Option<usize> = None;

    for rule in rules {
        if blank_message(rule.as_ref()) {
            return Err(SchemaError::InvalidRule {
                field: field.to_string(),
                reason: "message is blank".to_string(),
            });
        }
        match rule.kind() {
            RuleKind::MinLength(n) => min = Some(min.map_or(n, |m| m.max(n))),
            RuleKind::MaxLength(0) => {
                return Err(SchemaError::InvalidRule {
                    field: field.to_string(),
                    reason: "max length must be at least 1".to_string(),
                });
            }
            RuleKind::MaxLength(n) => max = Some(max.map_or(n, |m| m.min(n))),
            _ => {}
        }
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(SchemaError::ConflictingBounds {
                field: field.to_string(),
                min,
                max,
            });
        }
    }
    Ok(())
}

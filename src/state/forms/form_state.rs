//! Generic form state: values, dirty tracking, validation errors

use super::field::{pop_char, push_char, FieldKind, FieldValue, FormField, FormValues};
use super::validation::{evaluate, FieldRules};
use std::collections::{BTreeMap, BTreeSet};

/// Trait for common form operations on screen
pub trait Form {
    fn fields(&self) -> &[FormField];
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn state(&self) -> &FormState;
    fn state_mut(&mut self) -> &mut FormState;
    fn field_count(&self) -> usize {
        self.fields().len()
    }
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields().get(index)
    }
    fn get_active_field(&self) -> Option<&FormField> {
        self.get_field(self.active_field())
    }
    /// Name of the active field if typing edits it
    fn typing_target(&self) -> Option<String> {
        self.get_active_field()
            .filter(|f| f.accepts_typing())
            .map(|f| f.name.clone())
    }
    /// Type a character into the active field
    fn input_char(&mut self, c: char) {
        if let Some(name) = self.typing_target() {
            let next = push_char(self.state().value(&name).unwrap_or(&FieldValue::Null), c);
            self.state_mut().set_field(&name, next);
        }
    }
    /// Delete the last character of the active field
    fn backspace(&mut self) {
        if let Some(name) = self.typing_target() {
            let next = pop_char(self.state().value(&name).unwrap_or(&FieldValue::Null));
            self.state_mut().set_field(&name, next);
        }
    }
    /// Flip the active field if it is a toggle. Returns whether it was one.
    fn toggle_active_field(&mut self) -> bool {
        let Some(name) = self
            .get_active_field()
            .filter(|f| f.kind == FieldKind::Toggle)
            .map(|f| f.name.clone())
        else {
            return false;
        };
        let flipped = !self.state().value(&name).is_some_and(FieldValue::as_bool);
        self.state_mut().manual_set(&name, flipped);
        true
    }
}

/// Values, initial snapshot, per-field errors and manual overrides of one form
#[derive(Debug, Clone)]
pub struct FormState {
    values: FormValues,
    initial_values: FormValues,
    errors: BTreeMap<String, String>,
    manual: BTreeSet<String>,
    rules: FieldRules,
}

impl FormState {
    /// Create a form seeded with `initial_values`. No validation runs until a
    /// field changes or the form is submitted.
    pub fn new(initial_values: FormValues, rules: FieldRules) -> Self {
        Self {
            values: initial_values.clone(),
            initial_values,
            errors: BTreeMap::new(),
            manual: BTreeSet::new(),
            rules,
        }
    }

    /// Update a field from text input, validating only that field
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.manual.remove(name);
        self.apply(name, value.into());
    }

    /// Update a field from a non-typing source (uploads, buttons)
    pub fn manual_set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.manual.insert(name.to_string());
        self.apply(name, value.into());
    }

    fn apply(&mut self, name: &str, value: FieldValue) {
        self.validate_field(name, &value);
        self.values.insert(name.to_string(), value);
    }

    fn validate_field(&mut self, name: &str, value: &FieldValue) {
        let rules = self.rules.get(name).map_or(&[][..], Vec::as_slice);
        let evaluation = evaluate(value, rules);
        match evaluation.message {
            Some(message) if !evaluation.valid => {
                self.errors.insert(name.to_string(), message);
            }
            _ => {
                self.errors.remove(name);
            }
        }
    }

    /// Re-run every declared rule against the current values
    pub fn revalidate(&mut self) {
        let names: Vec<String> = self.rules.keys().cloned().collect();
        for name in names {
            let value = self.values.get(&name).cloned().unwrap_or_default();
            self.validate_field(&name, &value);
        }
    }

    /// Run `on_valid` with the current values if the form passes a full
    /// revalidation. Returns whether the callback ran.
    ///
    /// The initial snapshot is left alone; callers re-seed the form from
    /// external state once the submit went through.
    pub fn submit<F>(&mut self, on_valid: F) -> bool
    where
        F: FnOnce(&FormValues),
    {
        self.revalidate();
        if !self.errors.is_empty() {
            tracing::debug!(errors = ?self.errors, "Form submit blocked by validation");
            return false;
        }
        on_valid(&self.values);
        true
    }

    /// Restore the initial snapshot
    pub fn reset(&mut self) {
        self.values = self.initial_values.clone();
        self.errors.clear();
        self.manual.clear();
    }

    /// Replace the initial snapshot (and the values) with fresh external state
    pub fn reseed(&mut self, initial_values: FormValues) {
        self.initial_values = initial_values;
        self.reset();
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.initial_values
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text of a field, empty when absent or not text
    pub fn text(&self, name: &str) -> &str {
        self.value(name).map_or("", FieldValue::as_text)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Whether the field's current value came from `manual_set`
    pub fn is_manual(&self, name: &str) -> bool {
        self.manual.contains(name)
    }
}

// Whole-form views; the screens read one field at a time
#[allow(dead_code)]
impl FormState {
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn initial_values(&self) -> &FormValues {
        &self.initial_values
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }
}

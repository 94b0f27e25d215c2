//! Form field value objects

use std::collections::BTreeMap;

/// Untyped field value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    #[default]
    Null,
}

impl FieldValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Get the text value (empty for non-text values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Bool(_) | FieldValue::Null => "",
        }
    }

    /// Get the boolean value (false for non-bool values)
    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }

    /// The string a pattern rule is matched against
    pub fn pattern_subject(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Bool(true) => "true",
            FieldValue::Bool(false) => "false",
            FieldValue::Null => "",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Text)
    }
}

/// Field name -> value, ordered so structural equality is stable
pub type FormValues = BTreeMap<String, FieldValue>;

/// How a field is edited on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Toggle,
    /// Only changed through explicit actions (upload/remove), never typed into
    Manual,
    ReadOnly,
}

/// Describes a single form field on screen
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FormField {
    /// Create a new single-line text field
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Create a new multi-line text field
    pub fn multiline(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Multiline)
    }

    /// Create a new on/off field
    pub fn toggle(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Toggle)
    }

    pub fn manual(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Manual)
    }

    pub fn read_only(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::ReadOnly)
    }

    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    /// Whether key presses edit this field's text
    pub fn accepts_typing(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::Multiline)
    }

    pub fn is_multiline(&self) -> bool {
        self.kind == FieldKind::Multiline
    }

    /// Get the display value for rendering
    pub fn display_value(&self, value: &FieldValue) -> String {
        match (self.kind, value) {
            (FieldKind::Toggle, v) => {
                if v.as_bool() {
                    "[x] yes".to_string()
                } else {
                    "[ ] no".to_string()
                }
            }
            (_, FieldValue::Text(s)) => s.clone(),
            (_, FieldValue::Bool(b)) => b.to_string(),
            (_, FieldValue::Null) => String::new(),
        }
    }
}

/// Append a typed character to a text value
pub fn push_char(value: &FieldValue, c: char) -> FieldValue {
    let mut text = value.as_text().to_string();
    text.push(c);
    FieldValue::Text(text)
}

/// Remove the last character of a text value
pub fn pop_char(value: &FieldValue) -> FieldValue {
    let mut text = value.as_text().to_string();
    text.pop();
    FieldValue::Text(text)
}

//! Field validation rules
//!
//! Rules are evaluated one field at a time; there is no cross-field
//! validation. A field with no rules is always valid.

use super::field::FieldValue;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while declaring rules
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid validation pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// What a rule checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Pattern,
    Custom,
}

type RuleTest = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;

/// A single validation rule with the message shown when it fails
#[derive(Clone)]
pub struct ValidationRule {
    kind: RuleKind,
    test: RuleTest,
    message: String,
}

impl ValidationRule {
    /// Regex rule. The empty string is only accepted if the pattern itself
    /// matches it.
    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            kind: RuleKind::Pattern,
            test: Arc::new(move |value| regex.is_match(value.pattern_subject())),
            message: message.into(),
        })
    }

    /// Arbitrary predicate rule
    pub fn custom<F>(test: F, message: impl Into<String>) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        Self {
            kind: RuleKind::Custom,
            test: Arc::new(test),
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn passes(&self, value: &FieldValue) -> bool {
        (self.test)(value)
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Field name -> rules, in declaration order
pub type FieldRules = BTreeMap<String, Vec<ValidationRule>>;

/// Outcome of evaluating one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub valid: bool,
    pub message: Option<String>,
}

impl Evaluation {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Evaluate `value` against `rules`, returning the first failing rule's message
pub fn evaluate(value: &FieldValue, rules: &[ValidationRule]) -> Evaluation {
    rules
        .iter()
        .find(|rule| !rule.passes(value))
        .map_or_else(Evaluation::pass, |rule| Evaluation::fail(rule.message()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_specials() -> ValidationRule {
        ValidationRule::pattern(r"^[a-z]+$", "letters only").unwrap()
    }

    #[test]
    fn test_no_rules_is_valid() {
        assert_eq!(evaluate(&FieldValue::text("$$$"), &[]), Evaluation::pass());
    }

    #[test]
    fn test_pattern_pass_and_fail() {
        let rules = [no_specials()];
        assert!(evaluate(&FieldValue::text("abc"), &rules).valid);

        let result = evaluate(&FieldValue::text("ab1"), &rules);
        assert_eq!(result, Evaluation::fail("letters only"));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let rules = [
            ValidationRule::custom(|v| !v.as_text().is_empty(), "required"),
            ValidationRule::custom(|v| v.as_text().len() > 3, "too short"),
            no_specials(),
        ];
        assert_eq!(
            evaluate(&FieldValue::text(""), &rules).message.as_deref(),
            Some("required")
        );
        assert_eq!(
            evaluate(&FieldValue::text("a1"), &rules).message.as_deref(),
            Some("too short")
        );
        assert_eq!(
            evaluate(&FieldValue::text("abcd1"), &rules).message.as_deref(),
            Some("letters only")
        );
    }

    #[test]
    fn test_empty_string_needs_explicit_opt_in() {
        let strict = [no_specials()];
        assert!(!evaluate(&FieldValue::text(""), &strict).valid);

        let optional = [ValidationRule::pattern(r"^$|^[a-z]+$", "letters only").unwrap()];
        assert!(evaluate(&FieldValue::text(""), &optional).valid);
        assert!(evaluate(&FieldValue::Null, &optional).valid);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let rules = [no_specials()];
        let value = FieldValue::text("a-b");
        let first = evaluate(&value, &rules);
        for _ in 0..10 {
            assert_eq!(evaluate(&value, &rules), first);
        }
        assert_eq!(value, FieldValue::text("a-b"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = ValidationRule::pattern("([", "broken").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
        assert!(err.to_string().contains("(["));
    }

    #[test]
    fn test_debug_omits_closure() {
        let debug = format!("{:?}", no_specials());
        assert!(debug.contains("letters only"));
        assert!(debug.contains("Pattern"));
        let custom = format!("{:?}", ValidationRule::custom(|_| true, "never"));
        assert!(custom.contains("Custom"));
    }
}

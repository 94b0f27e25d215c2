//! Form domain layer
//!
//! Generic form state (values, dirty tracking, errors) and the validation
//! rules it evaluates. Knows nothing about aliases or profiles.

mod field;
mod form_state;
mod validation;

pub use field::{FieldKind, FieldValue, FormField, FormValues};
pub use form_state::{Form, FormState};
pub use validation::{FieldRules, RuleError, ValidationRule};

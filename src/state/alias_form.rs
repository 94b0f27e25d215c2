//! Alias create/edit modal form

use super::aliases::{AliasRecord, AncestorContext};
use super::forms::{
    FieldRules, FieldValue, Form, FormField, FormState, FormValues, RuleError, ValidationRule,
};
use super::payloads::{AliasIdentity, AliasUpdate};
use crate::store::AccountGateway;

pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const FWD_ADDRESSES: &str = "fwdAddresses";
pub const ACTIVE: &str = "active";

const NAME_PATTERN: &str = r"^[a-zA-Z0-9][a-zA-Z0-9._-]*$";
pub const NAME_MESSAGE: &str = "Alias names may only contain letters, numbers and . _ -";
pub const FWD_MESSAGE: &str = "Forward addresses must be comma-separated email addresses.";

/// Split the comma-separated forward address field, dropping blanks
pub fn parse_forward_addresses(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_mail_address(candidate: &str) -> bool {
    let mut parts = candidate.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !candidate.contains(char::is_whitespace)
                && domain.split('.').count() > 1
                && domain.split('.').all(|label| !label.is_empty())
        }
        _ => false,
    }
}

/// The alias modal. `target` is `None` when creating.
#[derive(Debug, Clone)]
pub struct AliasEditForm {
    pub form: FormState,
    fields: Vec<FormField>,
    pub active_field_index: usize,
    target: Option<AliasRecord>,
    ancestor: AncestorContext,
}

impl AliasEditForm {
    pub fn new(target: Option<AliasRecord>, ancestor: AncestorContext) -> Result<Self, RuleError> {
        let mut rules = FieldRules::new();
        rules.insert(
            FWD_ADDRESSES.to_string(),
            vec![ValidationRule::custom(
                |value| {
                    parse_forward_addresses(value.as_text())
                        .iter()
                        .all(|a| is_mail_address(a))
                },
                FWD_MESSAGE,
            )],
        );

        let name_field = if target.is_some() {
            FormField::read_only(NAME, "Alias")
        } else {
            rules.insert(
                NAME.to_string(),
                vec![
                    ValidationRule::custom(
                        |v| !v.as_text().is_empty(),
                        "An alias name is required.",
                    ),
                    ValidationRule::pattern(NAME_PATTERN, NAME_MESSAGE)?,
                ],
            );
            FormField::text(NAME, "Alias")
        };

        let initial = initial_values(target.as_ref());
        Ok(Self {
            form: FormState::new(initial, rules),
            fields: vec![
                name_field,
                FormField::multiline(DESCRIPTION, "Description"),
                FormField::text(FWD_ADDRESSES, "Forward Addresses (comma separated)"),
                FormField::toggle(ACTIVE, "Active"),
            ],
            active_field_index: usize::from(target.is_some()),
            target,
            ancestor,
        })
    }

    pub fn is_create(&self) -> bool {
        self.target.is_none()
    }

    pub fn title(&self) -> String {
        match &self.target {
            Some(record) => format!(
                "Edit {}#{}@{}",
                self.ancestor.namespace_name, record.name, self.ancestor.domain
            ),
            None => format!(
                "New alias in {}@{}",
                self.ancestor.namespace_name, self.ancestor.domain
            ),
        }
    }

    /// Build the payload for the current values
    fn payload(&self, values: &FormValues) -> AliasUpdate {
        let text = |name: &str| values.get(name).map_or("", FieldValue::as_text);
        let identity = match &self.target {
            Some(record) => record.identity(),
            None => AliasIdentity {
                namespace_name: self.ancestor.namespace_name.clone(),
                domain: self.ancestor.domain.clone(),
                address: text(NAME).to_string(),
            },
        };
        AliasUpdate {
            namespace_name: identity.namespace_name,
            domain: identity.domain,
            address: identity.address,
            description: text(DESCRIPTION).to_string(),
            fwd_addresses: parse_forward_addresses(text(FWD_ADDRESSES)),
            disabled: !values.get(ACTIVE).is_some_and(FieldValue::as_bool),
        }
    }

    /// Send a create or full-record update if the form validates.
    /// Returns whether a request was sent.
    pub fn submit(&mut self, gateway: &dyn AccountGateway) -> bool {
        let mut payload = None;
        self.form.submit(|values| payload = Some(values.clone()));
        let Some(values) = payload else {
            return false;
        };

        let update = self.payload(&values);
        if self.is_create() {
            tracing::info!(
                address = %update.address,
                namespace = %update.namespace_name,
                "Creating alias"
            );
            gateway.submit_alias_create(update);
        } else {
            tracing::info!(
                address = %update.address,
                namespace = %update.namespace_name,
                "Updating alias"
            );
            gateway.submit_alias_update(update);
        }
        true
    }
}

fn initial_values(target: Option<&AliasRecord>) -> FormValues {
    let mut values = FormValues::new();
    let (name, description, forwards, active) = target.map_or_else(
        || (String::new(), String::new(), String::new(), true),
        |record| {
            (
                record.name.clone(),
                record.description.clone(),
                record.fwd_addresses.join(", "),
                !record.disabled,
            )
        },
    );
    values.insert(NAME.to_string(), FieldValue::Text(name));
    values.insert(DESCRIPTION.to_string(), FieldValue::Text(description));
    values.insert(FWD_ADDRESSES.to_string(), FieldValue::Text(forwards));
    values.insert(ACTIVE.to_string(), FieldValue::Bool(active));
    values
}

impl Form for AliasEditForm {
    fn fields(&self) -> &[FormField] {
        &self.fields
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len() - 1);
    }
    fn state(&self) -> &FormState {
        &self.form
    }
    fn state_mut(&mut self) -> &mut FormState {
        &mut self.form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::aliases::test_support::{ancestor, record};
    use crate::store::MockAccountGateway;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    fn type_text(form: &mut AliasEditForm, text: &str) {
        for c in text.chars() {
            form.input_char(c);
        }
    }

    #[test]
    fn test_parse_forward_addresses() {
        assert_eq!(
            parse_forward_addresses(" a@b.com, ,c@d.org,"),
            vec!["a@b.com".to_string(), "c@d.org".to_string()]
        );
        assert!(parse_forward_addresses("").is_empty());
    }

    #[test]
    fn test_mail_address_check() {
        assert!(is_mail_address("a@b.com"));
        assert!(!is_mail_address("a@b"));
        assert!(!is_mail_address("@b.com"));
        assert!(!is_mail_address("a@@b.com"));
        assert!(!is_mail_address("a b@c.com"));
        assert!(!is_mail_address("a@b..com"));
    }

    mod create {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_name_field() {
            let form = AliasEditForm::new(None, ancestor()).unwrap();
            assert!(form.is_create());
            assert_eq!(form.get_active_field().unwrap().name, NAME);
            assert!(!form.form.is_dirty());
            assert_eq!(form.title(), "New alias in ns1@d.com");
        }

        #[test]
        fn test_empty_name_blocks_submit() {
            let mut gateway = MockAccountGateway::new();
            gateway.expect_submit_alias_create().never();

            let mut form = AliasEditForm::new(None, ancestor()).unwrap();
            assert!(!form.submit(&gateway));
            assert!(form.form.error(NAME).is_some());
        }

        #[test]
        fn test_bad_name_shows_message() {
            let mut form = AliasEditForm::new(None, ancestor()).unwrap();
            type_text(&mut form, "news letter");
            assert_eq!(form.form.error(NAME), Some(NAME_MESSAGE));
        }

        #[test]
        fn test_submit_creates_alias() {
            let mut gateway = MockAccountGateway::new();
            gateway
                .expect_submit_alias_create()
                .with(eq(AliasUpdate {
                    namespace_name: "ns1".to_string(),
                    domain: "d.com".to_string(),
                    address: "news".to_string(),
                    description: "letters".to_string(),
                    fwd_addresses: vec!["me@home.org".to_string()],
                    disabled: false,
                }))
                .times(1)
                .return_const(());

            let mut form = AliasEditForm::new(None, ancestor()).unwrap();
            type_text(&mut form, "news");
            form.next_field();
            type_text(&mut form, "letters");
            form.next_field();
            type_text(&mut form, "me@home.org");
            assert!(form.submit(&gateway));
        }

        #[test]
        fn test_bad_forward_blocks_submit() {
            let mut gateway = MockAccountGateway::new();
            gateway.expect_submit_alias_create().never();

            let mut form = AliasEditForm::new(None, ancestor()).unwrap();
            type_text(&mut form, "news");
            form.set_active_field(2);
            type_text(&mut form, "not-an-address");
            assert_eq!(form.form.error(FWD_ADDRESSES), Some(FWD_MESSAGE));
            assert!(!form.submit(&gateway));
        }
    }

    mod edit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_loads_record_values() {
            let form = AliasEditForm::new(Some(record("x", true)), ancestor()).unwrap();
            assert!(!form.is_create());
            assert_eq!(form.form.text(NAME), "x");
            assert_eq!(form.form.text(FWD_ADDRESSES), "x@forward.test");
            assert_eq!(form.form.value(ACTIVE), Some(&FieldValue::Bool(false)));
            assert_eq!(form.get_active_field().unwrap().name, DESCRIPTION);
            assert_eq!(form.title(), "Edit ns1#x@d.com");
        }

        #[test]
        fn test_name_is_read_only() {
            let mut form = AliasEditForm::new(Some(record("x", false)), ancestor()).unwrap();
            form.set_active_field(0);
            type_text(&mut form, "yz");
            assert_eq!(form.form.text(NAME), "x");
            assert!(!form.form.is_dirty());
        }

        #[test]
        fn test_submit_replaces_full_record() {
            let mut gateway = MockAccountGateway::new();
            gateway
                .expect_submit_alias_update()
                .with(eq(AliasUpdate {
                    namespace_name: "ns1".to_string(),
                    domain: "d.com".to_string(),
                    address: "x".to_string(),
                    description: "x alias!".to_string(),
                    fwd_addresses: vec!["x@forward.test".to_string()],
                    disabled: false,
                }))
                .times(1)
                .return_const(());
            gateway.expect_submit_alias_create().never();

            let mut form = AliasEditForm::new(Some(record("x", true)), ancestor()).unwrap();
            type_text(&mut form, "!");
            form.set_active_field(3);
            assert!(form.toggle_active_field());
            assert!(form.submit(&gateway));
        }
    }
}

//! Profile form: display name and avatar

use super::forms::{
    FieldRules, FieldValue, Form, FormField, FormState, FormValues, RuleError, ValidationRule,
};
use super::payloads::ProfileUpdate;
use crate::store::AccountGateway;
use serde::{Deserialize, Serialize};

pub const DISPLAY_NAME: &str = "displayName";
pub const AVATAR: &str = "avatar";

/// Empty, or words of letters, digits and `. - /` separated by single spaces
const DISPLAY_NAME_PATTERN: &str = r"^$|^([a-zA-Z0-9\.\-\/]+\s)*[a-zA-Z0-9\.\-\/]+$";
pub const DISPLAY_NAME_MESSAGE: &str = "No special characters allowed except for . - / allowed.";

/// Prefix stored in front of uploaded avatar data
const AVATAR_DATA_PREFIX: &str = "data:image/png;base64,";

/// Account profile as stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    pub avatar: Option<String>,
}

impl Profile {
    fn form_values(&self) -> FormValues {
        let mut values = FormValues::new();
        values.insert(
            DISPLAY_NAME.to_string(),
            FieldValue::text(self.display_name.clone()),
        );
        values.insert(AVATAR.to_string(), FieldValue::from(self.avatar.clone()));
        values
    }
}

impl From<&ProfileUpdate> for Profile {
    fn from(update: &ProfileUpdate) -> Self {
        Self {
            display_name: update.display_name.clone(),
            avatar: update.avatar.clone(),
        }
    }
}

/// Profile screen form
#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub form: FormState,
    fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl ProfileForm {
    pub fn from_profile(profile: &Profile) -> Result<Self, RuleError> {
        let mut rules = FieldRules::new();
        rules.insert(
            DISPLAY_NAME.to_string(),
            vec![ValidationRule::pattern(
                DISPLAY_NAME_PATTERN,
                DISPLAY_NAME_MESSAGE,
            )?],
        );

        Ok(Self {
            form: FormState::new(profile.form_values(), rules),
            fields: vec![
                FormField::text(DISPLAY_NAME, "Display Name"),
                FormField::manual(AVATAR, "Photo"),
            ],
            active_field_index: 0,
        })
    }

    /// Whether the avatar field is the active one
    pub fn is_avatar_active(&self) -> bool {
        self.get_active_field().is_some_and(|f| f.name == AVATAR)
    }

    pub fn avatar(&self) -> Option<&str> {
        Some(self.form.text(AVATAR)).filter(|s| !s.is_empty())
    }

    pub fn has_avatar(&self) -> bool {
        self.avatar().is_some()
    }

    /// Ask for a new avatar image; a canceled pick changes nothing.
    /// Returns whether the avatar changed.
    pub fn upload_avatar(&mut self, gateway: &dyn AccountGateway) -> bool {
        let upload = gateway.request_avatar_upload();
        if upload.canceled {
            return false;
        }
        match upload.data {
            Some(data) => {
                self.form
                    .manual_set(AVATAR, format!("{AVATAR_DATA_PREFIX}{data}"));
                true
            }
            None => false,
        }
    }

    pub fn remove_avatar(&mut self) {
        self.form.manual_set(AVATAR, FieldValue::Null);
    }

    /// Save and Cancel are only offered once something changed
    pub fn can_save(&self) -> bool {
        self.form.is_dirty()
    }

    /// Send the profile if it changed and validates, then adopt it as the new
    /// baseline. Returns whether an update was sent.
    pub fn submit(&mut self, gateway: &dyn AccountGateway) -> bool {
        if !self.can_save() {
            return false;
        }
        let mut sent = None;
        self.form.submit(|values| {
            let update = update_from_values(values);
            tracing::info!(display_name = %update.display_name, "Submitting profile update");
            gateway.submit_profile_update(update.clone());
            sent = Some(update);
        });

        match sent {
            Some(update) => {
                self.form.reseed(Profile::from(&update).form_values());
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.form.reset();
    }
}

fn update_from_values(values: &FormValues) -> ProfileUpdate {
    let text = |name: &str| values.get(name).map_or("", FieldValue::as_text);
    let avatar = text(AVATAR);
    ProfileUpdate {
        display_name: text(DISPLAY_NAME).to_string(),
        avatar: (!avatar.is_empty()).then(|| avatar.to_string()),
    }
}

impl Form for ProfileForm {
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

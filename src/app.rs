//! Application state and core logic

use crate::platform::is_command;
use crate::state::{
    project, AliasEditForm, AliasRecord, AliasViewRow, AncestorContext, AppState, FieldKind, Form,
    ListActionController, ProfileForm, TransitionError, View,
};
use crate::store::{AccountGateway, AccountReader};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Write port of the account store
    gateway: Arc<dyn AccountGateway>,
    /// Read port of the account store
    reader: Arc<dyn AccountReader>,
    /// Confirm dialog and edit modal of the alias table
    pub list_actions: ListActionController,
    /// Profile screen form, rebuilt whenever the screen is entered
    pub profile_form: ProfileForm,
    /// Open alias modal form
    pub alias_form: Option<AliasEditForm>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App over the store ports
    pub fn new(
        gateway: Arc<dyn AccountGateway>,
        reader: Arc<dyn AccountReader>,
        default_namespace: Option<&str>,
    ) -> Result<Self> {
        let mut state = AppState::default();
        if let Some(name) = default_namespace {
            match reader.namespaces().iter().position(|ns| ns == name) {
                Some(index) => state.namespace_index = index,
                None => tracing::warn!(namespace = name, "Configured namespace not found"),
            }
        }

        let profile_form = ProfileForm::from_profile(&reader.profile())?;
        Ok(Self {
            state,
            list_actions: ListActionController::new(Arc::clone(&gateway)),
            gateway,
            reader,
            profile_form,
            alias_form: None,
            quit: false,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    pub fn mailbox_address(&self) -> String {
        self.reader.mailbox_address()
    }

    pub fn namespaces(&self) -> Vec<String> {
        self.reader.namespaces()
    }

    pub fn current_namespace(&self) -> Option<String> {
        self.namespaces().into_iter().nth(self.state.namespace_index)
    }

    /// Context the alias rows of the current namespace are projected with
    pub fn ancestor(&self) -> Option<AncestorContext> {
        self.current_namespace().map(|namespace_name| AncestorContext {
            namespace_name,
            domain: self.reader.domain(),
        })
    }

    /// Table rows of the current namespace, derived from the store as it is now
    pub fn rows(&self) -> Vec<AliasViewRow> {
        let Some(ancestor) = self.ancestor() else {
            return Vec::new();
        };
        self.reader
            .aliases(&ancestor.namespace_name)
            .map(|collection| project(&collection, &ancestor))
            .unwrap_or_default()
    }

    pub fn selected_row(&self) -> Option<AliasViewRow> {
        self.rows().into_iter().nth(self.state.selected_index)
    }

    /// Stored record behind a row
    fn record_for(&self, row: &AliasViewRow) -> Option<AliasRecord> {
        let collection = self.reader.aliases(&row.ns)?;
        let identity = row.identity();
        let id = collection.find(&identity)?;
        collection.by_id.get(id).cloned()
    }

    /// Rejected transitions are logged and otherwise ignored
    fn log_rejected(&self, err: TransitionError) {
        tracing::error!(%err, "Ignored list action");
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Delete confirmation (modal)
        if self.list_actions.pending_delete().is_some() {
            self.handle_confirm_key(key);
            return Ok(());
        }

        // Alias modal
        if self.list_actions.is_editing() {
            self.handle_alias_modal_key(key);
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Aliases => self.handle_aliases_key(key),
            View::Profile => self.handle_profile_key(key),
        }

        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if view == View::Profile {
            match ProfileForm::from_profile(&self.reader.profile()) {
                Ok(form) => self.profile_form = form,
                Err(err) => {
                    self.push_error(format!("Cannot open profile: {err}"));
                    return;
                }
            }
        }
        self.state.current_view = view;
    }

    /// Handle keys in Aliases view
    fn handle_aliases_key(&mut self, key: KeyEvent) {
        let row_count = self.rows().len();
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(row_count),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char(']') => self.state.next_namespace(self.namespaces().len()),
            KeyCode::Char('[') => self.state.prev_namespace(self.namespaces().len()),
            KeyCode::Char('p') | KeyCode::Tab => self.navigate(View::Profile),
            KeyCode::Char(' ') => {
                if let Some(row) = self.selected_row() {
                    let update = self.list_actions.toggle_active(&row);
                    let verb = if update.disabled { "disabled" } else { "enabled" };
                    self.state.status_message = Some(format!("{} {verb}", row.address()));
                }
            }
            KeyCode::Char('n') => self.open_alias_modal(None),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(row) = self.selected_row() {
                    match self.record_for(&row) {
                        Some(record) => self.open_alias_modal(Some(record)),
                        None => self.push_error(format!("{} no longer exists", row.address())),
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(row) = self.selected_row() {
                    if let Err(err) = self.list_actions.request_delete(row) {
                        self.log_rejected(err);
                    }
                }
            }
            _ => {}
        }
    }

    /// Build the modal form, then enter the editing state
    fn open_alias_modal(&mut self, target: Option<AliasRecord>) {
        let Some(ancestor) = self.ancestor() else {
            self.push_error("No namespace to add an alias to");
            return;
        };
        let form = match AliasEditForm::new(target.clone(), ancestor) {
            Ok(form) => form,
            Err(err) => {
                self.push_error(format!("Cannot open alias form: {err}"));
                return;
            }
        };
        let transition = match target {
            Some(record) => self.list_actions.start_edit(record),
            None => self.list_actions.start_create(),
        };
        match transition {
            Ok(()) => self.alias_form = Some(form),
            Err(err) => self.log_rejected(err),
        }
    }

    fn close_alias_modal(&mut self) {
        self.alias_form = None;
        if let Err(err) = self.list_actions.close_modal() {
            self.log_rejected(err);
        }
    }

    /// Handle keys for the delete confirmation dialog
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let result = match key.code {
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::BackTab => {
                let delete = self
                    .list_actions
                    .pending_delete()
                    .is_some_and(|pending| !pending.delete_selected);
                self.list_actions.select_delete_option(delete);
                Ok(None)
            }
            KeyCode::Enter => self.list_actions.resolve_selected(),
            KeyCode::Char('y') => self.list_actions.confirm().map(Some),
            KeyCode::Char('n') | KeyCode::Esc => self.list_actions.cancel().map(|()| None),
            _ => Ok(None),
        };

        match result {
            Ok(Some(identity)) => {
                self.state.status_message = Some(format!(
                    "Deleted {}#{}@{}",
                    identity.namespace_name, identity.address, identity.domain
                ));
                self.state.clamp_selection(self.rows().len());
            }
            Ok(None) => {}
            Err(err) => self.log_rejected(err),
        }
    }

    /// Handle keys for the alias create/edit modal
    fn handle_alias_modal_key(&mut self, key: KeyEvent) {
        if is_command(&key, 's') {
            let sent = match self.alias_form.as_mut() {
                Some(form) => form.submit(self.gateway.as_ref()),
                None => false,
            };
            if sent {
                let message = match self.list_actions.edit_target() {
                    Some(record) => format!("Alias {} saved", record.name),
                    None => "Alias created".to_string(),
                };
                self.state.status_message = Some(message);
                self.close_alias_modal();
                self.state.clamp_selection(self.rows().len());
            }
            return;
        }

        if key.code == KeyCode::Esc {
            self.close_alias_modal();
            return;
        }

        let Some(form) = self.alias_form.as_mut() else {
            return;
        };
        let kind = form.get_active_field().map(|field| field.kind);
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Char(' ') | KeyCode::Enter if kind == Some(FieldKind::Toggle) => {
                form.toggle_active_field();
            }
            // Enter in the description adds a newline
            KeyCode::Enter if kind == Some(FieldKind::Multiline) => form.input_char('\n'),
            KeyCode::Char(c) if is_plain(&key) => form.input_char(c),
            KeyCode::Backspace => form.backspace(),
            _ => {}
        }
    }

    /// Handle keys in Profile view
    fn handle_profile_key(&mut self, key: KeyEvent) {
        if is_command(&key, 's') {
            if self.profile_form.submit(self.gateway.as_ref()) {
                self.state.status_message = Some("Profile saved".to_string());
            } else if !self.profile_form.form.is_valid() {
                self.state.status_message = Some("Fix the highlighted fields".to_string());
            }
            return;
        }
        if is_command(&key, 'r') {
            if self.profile_form.can_save() {
                self.profile_form.reset();
            }
            return;
        }

        let on_avatar = self.profile_form.is_avatar_active();
        match key.code {
            KeyCode::Esc => {
                self.profile_form.reset();
                self.navigate(View::Aliases);
            }
            KeyCode::Tab | KeyCode::Down => self.profile_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.profile_form.prev_field(),
            KeyCode::Char('u') if on_avatar => {
                if !self.profile_form.upload_avatar(self.gateway.as_ref()) {
                    self.state.status_message = Some("Avatar upload canceled".to_string());
                }
            }
            KeyCode::Char('x') if on_avatar => self.profile_form.remove_avatar(),
            KeyCode::Char(c) if is_plain(&key) => self.profile_form.input_char(c),
            KeyCode::Backspace => self.profile_form.backspace(),
            _ => {}
        }
    }
}

/// Typed text, as opposed to a Ctrl/Alt/Cmd chord
fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

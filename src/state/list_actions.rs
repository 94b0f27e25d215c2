//! Row actions on the alias table: toggle, edit modal, delete confirmation

use super::aliases::{AliasRecord, AliasViewRow};
use super::payloads::{AliasIdentity, AliasUpdate};
use crate::store::AccountGateway;
use std::sync::Arc;
use thiserror::Error;

/// A row waiting for the user to confirm its deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeleteAction {
    pub row: AliasViewRow,
    /// Highlighted dialog option; starts on Cancel
    pub delete_selected: bool,
}

/// Which modal (if any) the alias table is showing. Only one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListActionState {
    #[default]
    Idle,
    ConfirmingDelete(PendingDeleteAction),
    /// `None` while creating a new alias
    Editing(Option<AliasRecord>),
}

impl ListActionState {
    fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ConfirmingDelete(_) => "confirming a delete",
            Self::Editing(_) => "editing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action} while {state}")]
    NotAllowed {
        action: &'static str,
        state: &'static str,
    },
}

/// Owns the modal state of the alias table and issues row requests
pub struct ListActionController {
    state: ListActionState,
    gateway: Arc<dyn AccountGateway>,
}

impl ListActionController {
    pub fn new(gateway: Arc<dyn AccountGateway>) -> Self {
        Self {
            state: ListActionState::Idle,
            gateway,
        }
    }

    pub fn state(&self) -> &ListActionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ListActionState::Idle)
    }

    pub fn pending_delete(&self) -> Option<&PendingDeleteAction> {
        match &self.state {
            ListActionState::ConfirmingDelete(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, ListActionState::Editing(_))
    }

    /// Record being edited; `None` when creating or not editing
    pub fn edit_target(&self) -> Option<&AliasRecord> {
        match &self.state {
            ListActionState::Editing(target) => target.as_ref(),
            _ => None,
        }
    }

    fn require_idle(&self, action: &'static str) -> Result<(), TransitionError> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(self.not_allowed(action))
        }
    }

    fn not_allowed(&self, action: &'static str) -> TransitionError {
        TransitionError::NotAllowed {
            action,
            state: self.state.label(),
        }
    }

    /// Open the modal for a new alias
    pub fn start_create(&mut self) -> Result<(), TransitionError> {
        self.require_idle("start creating an alias")?;
        self.state = ListActionState::Editing(None);
        tracing::debug!("Alias modal opened for a new alias");
        Ok(())
    }

    /// Open the modal for an existing alias
    pub fn start_edit(&mut self, record: AliasRecord) -> Result<(), TransitionError> {
        self.require_idle("edit an alias")?;
        tracing::debug!(alias = %record.name, "Alias modal opened for editing");
        self.state = ListActionState::Editing(Some(record));
        Ok(())
    }

    /// Ask for confirmation before deleting `row`
    pub fn request_delete(&mut self, row: AliasViewRow) -> Result<(), TransitionError> {
        self.require_idle("request a delete")?;
        tracing::debug!(alias = %row.address(), row = row.id, "Delete confirmation opened");
        self.state = ListActionState::ConfirmingDelete(PendingDeleteAction {
            row,
            delete_selected: false,
        });
        Ok(())
    }

    /// Move the dialog highlight between Cancel and Delete
    pub fn select_delete_option(&mut self, delete: bool) {
        if let ListActionState::ConfirmingDelete(pending) = &mut self.state {
            pending.delete_selected = delete;
        }
    }

    /// Delete the pending row and return to idle
    pub fn confirm(&mut self) -> Result<AliasIdentity, TransitionError> {
        let ListActionState::ConfirmingDelete(pending) = &self.state else {
            return Err(self.not_allowed("confirm a delete"));
        };
        let identity = pending.row.identity();
        self.state = ListActionState::Idle;

        tracing::info!(
            namespace = %identity.namespace_name,
            address = %identity.address,
            "Deleting alias"
        );
        self.gateway.submit_alias_delete(identity.clone());
        Ok(identity)
    }

    /// Drop the pending delete without sending anything
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        if self.pending_delete().is_none() {
            return Err(self.not_allowed("cancel a delete"));
        }
        self.state = ListActionState::Idle;
        tracing::debug!("Delete canceled");
        Ok(())
    }

    /// Act on whichever dialog option is highlighted.
    /// Returns the deleted identity when Delete was highlighted.
    pub fn resolve_selected(&mut self) -> Result<Option<AliasIdentity>, TransitionError> {
        match self.pending_delete().map(|p| p.delete_selected) {
            Some(true) => self.confirm().map(Some),
            Some(false) => self.cancel().map(|()| None),
            None => Err(self.not_allowed("resolve a delete")),
        }
    }

    /// Close the alias modal, submitted or not
    pub fn close_modal(&mut self) -> Result<(), TransitionError> {
        if !self.is_editing() {
            return Err(self.not_allowed("close the alias modal"));
        }
        self.state = ListActionState::Idle;
        Ok(())
    }

    /// Flip a row's active state without waiting for the store.
    ///
    /// The payload carries every attribute of the row; only `disabled` is
    /// inverted. A failed request is reconciled by the store, not here.
    pub fn toggle_active(&self, row: &AliasViewRow) -> AliasUpdate {
        let update = AliasUpdate {
            namespace_name: row.ns.clone(),
            domain: row.domain.clone(),
            address: row.alias.clone(),
            description: row.description.clone(),
            fwd_addresses: row.fwd_addresses.clone(),
            disabled: !row.disabled,
        };
        tracing::info!(alias = %row.address(), disabled = update.disabled, "Toggling alias");
        self.gateway.submit_alias_update(update.clone());
        update
    }
}

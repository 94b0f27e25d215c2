//! Ports between the settings screens and the account store, mockable in tests

use super::snapshot::AccountSnapshot;
use super::StoreError;
use crate::state::{
    AliasCollection, AliasIdentity, AliasUpdate, AvatarUpload, Profile, ProfileUpdate,
};
use async_trait::async_trait;

/// Outbound requests. Every call returns immediately; the screens never wait
/// for the outcome.
#[cfg_attr(test, mockall::automock)]
pub trait AccountGateway: Send + Sync {
    fn submit_profile_update(&self, update: ProfileUpdate);

    /// Replace an alias record (full record, not a patch)
    fn submit_alias_update(&self, update: AliasUpdate);

    fn submit_alias_create(&self, update: AliasUpdate);

    fn submit_alias_delete(&self, identity: AliasIdentity);

    /// Ask the user for an avatar image
    fn request_avatar_upload(&self) -> AvatarUpload;
}

/// Current account state, read at call time
#[cfg_attr(test, mockall::automock)]
pub trait AccountReader: Send + Sync {
    /// Namespace names in display order
    fn namespaces(&self) -> Vec<String>;

    fn aliases(&self, namespace: &str) -> Option<AliasCollection>;

    fn domain(&self) -> String;

    fn mailbox_address(&self) -> String;

    fn profile(&self) -> Profile;
}

/// Where the authoritative snapshot is persisted
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountBackend: Send + Sync {
    async fn load(&self) -> Result<AccountSnapshot, StoreError>;

    async fn save(&self, snapshot: &AccountSnapshot) -> Result<(), StoreError>;
}

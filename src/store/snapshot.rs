//! The persisted account document and the requests that change it

use super::StoreError;
use crate::state::{
    AliasCollection, AliasIdentity, AliasRecord, AliasUpdate, Profile, ProfileUpdate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One alias namespace of the mailbox
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub aliases: AliasCollection,
}

/// Everything the settings screens read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub mailbox_address: String,
    pub domain: String,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
}

/// A change sent from the screens to the store worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    UpdateProfile(ProfileUpdate),
    UpdateAlias(AliasUpdate),
    CreateAlias(AliasUpdate),
    DeleteAlias(AliasIdentity),
}

impl StoreRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpdateProfile(_) => "update profile",
            Self::UpdateAlias(_) => "update alias",
            Self::CreateAlias(_) => "create alias",
            Self::DeleteAlias(_) => "delete alias",
        }
    }
}

impl AccountSnapshot {
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    fn namespace_mut(&mut self, name: &str) -> Result<&mut Namespace, StoreError> {
        self.namespaces
            .iter_mut()
            .find(|ns| ns.name == name)
            .ok_or_else(|| StoreError::UnknownNamespace(name.to_string()))
    }

    /// Apply `request` in place. On error the snapshot is unchanged.
    pub fn apply(&mut self, request: &StoreRequest) -> Result<(), StoreError> {
        match request {
            StoreRequest::UpdateProfile(update) => {
                self.profile = Profile::from(update);
            }
            StoreRequest::UpdateAlias(update) => {
                let identity = update.identity();
                let namespace = self.namespace_mut(&update.namespace_name)?;
                let record = namespace
                    .aliases
                    .find_mut(&identity)
                    .ok_or_else(|| StoreError::UnknownAlias(identity.clone()))?;
                record.apply_update(update);
            }
            StoreRequest::CreateAlias(update) => {
                let identity = update.identity();
                let namespace = self.namespace_mut(&update.namespace_name)?;
                if namespace.aliases.find(&identity).is_some() {
                    return Err(StoreError::AliasExists(identity));
                }
                let record = AliasRecord {
                    name: update.address.clone(),
                    namespace: update.namespace_name.clone(),
                    domain: update.domain.clone(),
                    created_at: Utc::now(),
                    disabled: update.disabled,
                    fwd_addresses: update.fwd_addresses.clone(),
                    description: update.description.clone(),
                };
                namespace
                    .aliases
                    .insert(uuid::Uuid::new_v4().to_string(), record);
            }
            StoreRequest::DeleteAlias(identity) => {
                let namespace = self.namespace_mut(&identity.namespace_name)?;
                namespace
                    .aliases
                    .remove(identity)
                    .ok_or_else(|| StoreError::UnknownAlias(identity.clone()))?;
            }
        }
        Ok(())
    }

    /// Starter document written on first run
    pub fn sample() -> Self {
        let domain = "mailbox.local".to_string();
        let alias = |namespace: &str, name: &str, forward: &str, description: &str, secs: i64| {
            AliasRecord {
                name: name.to_string(),
                namespace: namespace.to_string(),
                domain: domain.clone(),
                created_at: DateTime::from_timestamp(secs, 0).unwrap_or_default(),
                disabled: false,
                fwd_addresses: vec![forward.to_string()],
                description: description.to_string(),
            }
        };

        let mut personal = AliasCollection::default();
        personal.insert(
            "sample-news".to_string(),
            alias("personal", "news", "me@home.example", "Newsletters", 1_622_548_800),
        );
        personal.insert(
            "sample-shop".to_string(),
            alias("personal", "shop", "me@home.example", "Online shopping", 1_625_140_800),
        );
        let mut work = AliasCollection::default();
        work.insert(
            "sample-billing".to_string(),
            alias("work", "billing", "finance@work.example", "Invoices", 1_630_454_400),
        );

        Self {
            mailbox_address: format!("me@{domain}"),
            profile: Profile {
                display_name: "Mailbox User".to_string(),
                avatar: None,
            },
            namespaces: vec![
                Namespace {
                    name: "personal".to_string(),
                    aliases: personal,
                },
                Namespace {
                    name: "work".to_string(),
                    aliases: work,
                },
            ],
            domain,
        }
    }
}

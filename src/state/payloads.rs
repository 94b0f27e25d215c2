//! Fixed-shape request payloads sent to the account store

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: String,
    pub avatar: Option<String>,
}

/// Full-record replacement of an alias (not a partial patch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasUpdate {
    pub namespace_name: String,
    pub domain: String,
    pub address: String,
    pub description: String,
    pub fwd_addresses: Vec<String>,
    pub disabled: bool,
}

impl AliasUpdate {
    pub fn identity(&self) -> AliasIdentity {
        AliasIdentity {
            namespace_name: self.namespace_name.clone(),
            domain: self.domain.clone(),
            address: self.address.clone(),
        }
    }
}

/// Composite identity of an alias
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasIdentity {
    pub namespace_name: String,
    pub domain: String,
    pub address: String,
}

/// Result of asking the user for an avatar image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvatarUpload {
    pub canceled: bool,
    /// Base64-encoded image bytes
    pub data: Option<String>,
}

impl AvatarUpload {
    pub fn canceled() -> Self {
        Self {
            canceled: true,
            data: None,
        }
    }

    pub fn picked(data: String) -> Self {
        Self {
            canceled: false,
            data: Some(data),
        }
    }
}

//! Local account store backing the settings screens
//!
//! The screens only see the [`AccountGateway`] and [`AccountReader`] ports.
//! [`StoreClient`] applies writes to its snapshot right away and hands them to
//! a [`StoreWorker`] task, which persists them through an [`AccountBackend`]
//! and publishes the authoritative result back.

mod backend;
mod client;
mod snapshot;
mod traits;
mod worker;

pub use backend::JsonFileBackend;
pub use client::StoreClient;
pub use snapshot::{AccountSnapshot, StoreRequest};
pub use traits::{AccountBackend, AccountGateway, AccountReader};
pub use worker::StoreWorker;

#[cfg(test)]
pub use traits::{MockAccountBackend, MockAccountGateway, MockAccountReader};

use crate::state::AliasIdentity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("account store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown namespace {0}")]
    UnknownNamespace(String),

    #[error("unknown alias {}#{}@{}", .0.namespace_name, .0.address, .0.domain)]
    UnknownAlias(AliasIdentity),

    #[error("alias {}#{}@{} already exists", .0.namespace_name, .0.address, .0.domain)]
    AliasExists(AliasIdentity),
}

//! Screen-side handle to the account store

use super::{
    AccountBackend, AccountGateway, AccountReader, AccountSnapshot, StoreRequest, StoreWorker,
};
use crate::state::{
    AliasCollection, AliasIdentity, AliasUpdate, AvatarUpload, Profile, ProfileUpdate,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tokio::sync::mpsc::{self, UnboundedSender};

/// Implements both ports over a shared snapshot.
///
/// Writes land in the snapshot immediately and are queued for the worker;
/// the worker later overwrites the snapshot with what was actually saved.
pub struct StoreClient {
    snapshot: Arc<RwLock<AccountSnapshot>>,
    requests: UnboundedSender<StoreRequest>,
    avatar_path: Option<PathBuf>,
}

impl StoreClient {
    pub fn new(
        snapshot: Arc<RwLock<AccountSnapshot>>,
        requests: UnboundedSender<StoreRequest>,
        avatar_path: Option<PathBuf>,
    ) -> Self {
        Self {
            snapshot,
            requests,
            avatar_path,
        }
    }

    /// Create a client and the worker that serves it
    pub fn connect(
        initial: AccountSnapshot,
        backend: Arc<dyn AccountBackend>,
        avatar_path: Option<PathBuf>,
    ) -> (Self, StoreWorker) {
        let shared = Arc::new(RwLock::new(initial.clone()));
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = StoreWorker::new(initial, Arc::clone(&shared), rx, backend);
        (Self::new(shared, tx, avatar_path), worker)
    }

    fn read(&self) -> RwLockReadGuard<'_, AccountSnapshot> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply locally, then queue for persistence.
    ///
    /// The request is queued before the lock is released, so a change visible
    /// in the snapshot is always already in the worker's queue.
    fn send(&self, request: StoreRequest) {
        let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = snapshot.apply(&request) {
            tracing::warn!(request = request.kind(), %err, "Optimistic update not applied");
        }
        if self.requests.send(request).is_err() {
            tracing::error!("Account store worker has stopped, request dropped");
        }
    }
}

impl AccountGateway for StoreClient {
    fn submit_profile_update(&self, update: ProfileUpdate) {
        self.send(StoreRequest::UpdateProfile(update));
    }

    fn submit_alias_update(&self, update: AliasUpdate) {
        self.send(StoreRequest::UpdateAlias(update));
    }

    fn submit_alias_create(&self, update: AliasUpdate) {
        self.send(StoreRequest::CreateAlias(update));
    }

    fn submit_alias_delete(&self, identity: AliasIdentity) {
        self.send(StoreRequest::DeleteAlias(identity));
    }

    /// Reads the configured avatar file; no file means the pick was canceled
    fn request_avatar_upload(&self) -> AvatarUpload {
        let Some(path) = &self.avatar_path else {
            tracing::warn!("No avatar_path configured");
            return AvatarUpload::canceled();
        };
        match std::fs::read(path) {
            Ok(bytes) => AvatarUpload::picked(STANDARD.encode(bytes)),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Could not read avatar image");
                AvatarUpload::canceled()
            }
        }
    }
}

impl AccountReader for StoreClient {
    fn namespaces(&self) -> Vec<String> {
        self.read()
            .namespaces
            .iter()
            .map(|ns| ns.name.clone())
            .collect()
    }

    fn aliases(&self, namespace: &str) -> Option<AliasCollection> {
        self.read().namespace(namespace).map(|ns| ns.aliases.clone())
    }

    fn domain(&self) -> String {
        self.read().domain.clone()
    }

    fn mailbox_address(&self) -> String {
        self.read().mailbox_address.clone()
    }

    fn profile(&self) -> Profile {
        self.read().profile.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(
        avatar_path: Option<PathBuf>,
    ) -> (StoreClient, mpsc::UnboundedReceiver<StoreRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(RwLock::new(AccountSnapshot::sample()));
        (StoreClient::new(shared, tx, avatar_path), rx)
    }

    fn news(disabled: bool) -> AliasUpdate {
        AliasUpdate {
            namespace_name: "personal".to_string(),
            domain: "mailbox.local".to_string(),
            address: "news".to_string(),
            description: "Newsletters".to_string(),
            fwd_addresses: vec!["me@home.example".to_string()],
            disabled,
        }
    }

    mod reads {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reader_exposes_snapshot() {
            let (client, _rx) = client(None);
            assert_eq!(client.namespaces(), vec!["personal", "work"]);
            assert_eq!(client.domain(), "mailbox.local");
            assert_eq!(client.mailbox_address(), "me@mailbox.local");
            assert_eq!(client.profile().display_name, "Mailbox User");
            assert_eq!(client.aliases("work").unwrap().all_ids.len(), 1);
            assert!(client.aliases("nope").is_none());
        }
    }

    mod writes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_update_is_applied_and_queued() {
            let (client, mut rx) = client(None);
            client.submit_alias_update(news(true));

            let aliases = client.aliases("personal").unwrap();
            let record = aliases.by_id.values().find(|r| r.name == "news").unwrap();
            assert!(record.disabled);
            assert_eq!(rx.try_recv().unwrap(), StoreRequest::UpdateAlias(news(true)));
        }

        #[test]
        fn test_delete_is_applied_and_queued() {
            let (client, mut rx) = client(None);
            let identity = news(false).identity();
            client.submit_alias_delete(identity.clone());

            assert_eq!(client.aliases("personal").unwrap().all_ids.len(), 1);
            assert_eq!(rx.try_recv().unwrap(), StoreRequest::DeleteAlias(identity));
        }

        #[test]
        fn test_rejected_change_is_still_queued() {
            let (client, mut rx) = client(None);
            let before = client.aliases("personal");
            client.submit_alias_create(news(false));

            assert_eq!(client.aliases("personal"), before);
            assert!(matches!(rx.try_recv(), Ok(StoreRequest::CreateAlias(_))));
        }

        #[test]
        fn test_send_after_worker_stopped_does_not_panic() {
            let (client, rx) = client(None);
            drop(rx);
            client.submit_profile_update(ProfileUpdate {
                display_name: "Ann".to_string(),
                avatar: None,
            });
            assert_eq!(client.profile().display_name, "Ann");
        }
    }

    mod avatar {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_no_path_is_canceled() {
            let (client, _rx) = client(None);
            assert_eq!(client.request_avatar_upload(), AvatarUpload::canceled());
        }

        #[test]
        fn test_missing_file_is_canceled() {
            let path = std::env::temp_dir().join(format!("{}.png", uuid::Uuid::new_v4()));
            let (client, _rx) = client(Some(path));
            assert!(client.request_avatar_upload().canceled);
        }

        #[test]
        fn test_file_is_base64_encoded() {
            let path = std::env::temp_dir().join(format!("{}.png", uuid::Uuid::new_v4()));
            std::fs::write(&path, b"ABC").unwrap();

            let (client, _rx) = client(Some(path.clone()));
            assert_eq!(
                client.request_avatar_upload(),
                AvatarUpload::picked("QUJD".to_string())
            );
            let _ = std::fs::remove_file(path);
        }
    }
}

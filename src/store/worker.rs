//! Background task that persists store requests

use super::{AccountBackend, AccountSnapshot, StoreRequest};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc::UnboundedReceiver;

/// Owns the authoritative snapshot.
///
/// Each request is applied to a copy and saved; the copy only becomes
/// authoritative once the save succeeded. Once the queue drains the
/// authoritative snapshot is published over whatever the client applied
/// optimistically, which is also when failed requests visibly revert.
pub struct StoreWorker {
    current: AccountSnapshot,
    shared: Arc<RwLock<AccountSnapshot>>,
    requests: UnboundedReceiver<StoreRequest>,
    backend: Arc<dyn AccountBackend>,
}

impl StoreWorker {
    pub fn new(
        current: AccountSnapshot,
        shared: Arc<RwLock<AccountSnapshot>>,
        requests: UnboundedReceiver<StoreRequest>,
        backend: Arc<dyn AccountBackend>,
    ) -> Self {
        Self {
            current,
            shared,
            requests,
            backend,
        }
    }

    /// Serve requests until every client is dropped
    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.handle(&request).await;
            self.publish_if_idle();
        }
        tracing::debug!("Account store worker stopped");
    }

    async fn handle(&mut self, request: &StoreRequest) {
        let mut next = self.current.clone();
        let result = match next.apply(request) {
            Ok(()) => self.backend.save(&next).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                tracing::info!(request = request.kind(), "Account store updated");
                self.current = next;
            }
            Err(err) => {
                tracing::warn!(
                    request = request.kind(),
                    %err,
                    "Account store update failed, reverting"
                );
            }
        }
    }

    /// Overwrite the shared snapshot unless more requests are queued.
    ///
    /// The queue is checked under the write lock; clients queue while holding
    /// it, so no optimistic change can slip in between check and overwrite.
    fn publish_if_idle(&self) {
        let mut shared = self.shared.write().unwrap_or_else(PoisonError::into_inner);
        if self.requests.is_empty() {
            *shared = self.current.clone();
        }
    }
}

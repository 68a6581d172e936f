//! Correlation table for one connection.
//!
//! Every outbound request registers its correlation id here and waits on the
//! returned receiver. The reader task resolves entries as replies arrive. When
//! the connection dies the table is closed: waiting callers see their sender
//! dropped and new registrations are refused.

use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::{DashMap, Entry};
use tokio::sync::oneshot;
use tracing::trace;

use crate::{
    error::SocketError,
    response::ResponseData,
    types::{ReqId, SocketResult},
};

#[derive(Debug, Default)]
pub struct PendingTable {
    entries: DashMap<ReqId, oneshot::Sender<ResponseData>>,
    closed: AtomicBool,
}

impl PendingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: ReqId) -> SocketResult<oneshot::Receiver<ResponseData>> {
        if self.is_closed() {
            return Err(SocketError::Closed(id));
        }

        let (tx, rx) = oneshot::channel();

        match self.entries.entry(id.clone()) {
            Entry::Occupied(_) => return Err(SocketError::DuplicateId(id)),
            Entry::Vacant(v) => {
                v.insert(tx);
            }
        }

        // close() pudo correr entre el chequeo y el insert
        if self.is_closed() {
            self.entries.remove(&id);
            return Err(SocketError::Closed(id));
        }

        Ok(rx)
    }

    /// Hands the reply to its waiter. False when nobody waits for `id` anymore.
    pub fn resolve(&self, id: &str, data: ResponseData) -> bool {
        match self.entries.remove(id) {
            Some((_, tx)) => tx.send(data).is_ok(),
            None => false,
        }
    }

    pub fn cancel(&self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Refuses new registrations and drops every waiting sender.
    pub fn close(&self) -> usize {
        self.closed.store(true, Ordering::SeqCst);

        let ids: Vec<ReqId> = self.entries.iter().map(|e| e.key().clone()).collect();
        let failed = ids
            .iter()
            .filter(|id| self.entries.remove(id.as_str()).is_some())
            .count();

        trace!(failed, "pending table closed");
        failed
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

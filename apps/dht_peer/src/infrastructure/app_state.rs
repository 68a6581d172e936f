use std::sync::Arc;

use dashmap::DashMap;
use dht_net::Socket;
use tokio::{sync::OnceCell, task::JoinHandle};

use crate::core::domain::models::PeerId;

/// An established outbound connection and the tasks pumping it.
pub struct PeerConnection {
    pub socket: Arc<Socket>,
    writer: JoinHandle<()>,
    reader: JoinHandle<()>,
}

impl PeerConnection {
    #[inline]
    pub fn new(socket: Arc<Socket>, writer: JoinHandle<()>, reader: JoinHandle<()>) -> Self {
        Self {
            socket,
            writer,
            reader,
        }
    }

    #[inline]
    pub fn new_shared(
        socket: Arc<Socket>,
        writer: JoinHandle<()>,
        reader: JoinHandle<()>,
    ) -> Arc<Self> {
        Arc::new(Self::new(socket, writer, reader))
    }

    pub fn is_alive(&self) -> bool {
        !self.socket.is_closed() && !self.reader.is_finished()
    }

    /// Fails pending requests and stops both tasks.
    pub fn shutdown(&self) {
        self.socket.close();
        self.writer.abort();
        self.reader.abort();
    }
}

impl Drop for PeerConnection {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Slot for one peer's connection. Empty while nobody has connected yet or
/// after a failed attempt.
pub type ConnectionSlot = Arc<OnceCell<Arc<PeerConnection>>>;

pub struct AppNetworkState {
    pub connections: DashMap<Arc<PeerId>, ConnectionSlot>,
}

impl AppNetworkState {
    #[inline]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    #[inline]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Slot for `peer`, created atomically if missing.
    pub fn slot(&self, peer: &Arc<PeerId>) -> ConnectionSlot {
        self.connections.entry(peer.clone()).or_default().value().clone()
    }

    /// Forgets `slot` if it is still the one registered for `peer`.
    pub fn evict(&self, peer: &PeerId, slot: &ConnectionSlot) -> bool {
        self.connections
            .remove_if(peer, |_, current| Arc::ptr_eq(current, slot))
            .is_some()
    }

    pub fn established(&self, peer: &PeerId) -> Option<Arc<PeerConnection>> {
        self.connections
            .get(peer)
            .and_then(|slot| slot.get().cloned())
    }

    pub fn established_count(&self) -> usize {
        self.connections
            .iter()
            .filter(|entry| entry.value().get().is_some_and(|c| c.is_alive()))
            .count()
    }
}

impl Default for AppNetworkState {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::Arc;

use crate::core::domain::models::PeerId;

/// Maps keys to their owning peer. Built once, never mutated.
pub trait HashRingService: Send + Sync {
    fn create_hash(&self, key: &str) -> u64;

    /// Owner of the ring position `hash`.
    fn locate(&self, hash: u64) -> Arc<PeerId>;

    fn lookup(&self, key: &str) -> Arc<PeerId> {
        self.locate(self.create_hash(key))
    }
}

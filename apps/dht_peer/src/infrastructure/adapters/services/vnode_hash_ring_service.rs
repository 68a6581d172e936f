use std::{
    collections::{BTreeMap, btree_map::Entry},
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

use tracing::debug;

use crate::core::domain::{
    models::{AppError, PeerId},
    services::HashRingService,
};

pub const VNODE_REPLICAS: usize = 128;

/// Consistent-hash ring with virtual nodes, built once from the peer list.
///
/// Every peer is placed at `vnodes` positions on a `u64` ring; a key belongs
/// to the first position at or after its hash, wrapping around to the start.
/// The ring is immutable after `build`, so lookups need no locking.
pub struct VnodeHashRingService {
    ring: BTreeMap<u64, Arc<PeerId>>,
    peers: Vec<Arc<PeerId>>,
}

impl VnodeHashRingService {
    /// Validates config entries (`"<host> <port>"`) and builds the ring.
    pub fn build<S: AsRef<str>>(entries: &[S], vnodes: usize) -> Result<Self, AppError> {
        let peers = entries
            .iter()
            .map(|entry| entry.as_ref().parse::<PeerId>())
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_peers(peers, vnodes)
    }

    pub fn from_peers(peers: Vec<PeerId>, vnodes: usize) -> Result<Self, AppError> {
        if peers.is_empty() {
            return Err(AppError::Config("peer list is empty".to_string()));
        }
        if vnodes == 0 {
            return Err(AppError::Config("ring needs at least one vnode per peer".to_string()));
        }

        let mut unique: Vec<Arc<PeerId>> = Vec::with_capacity(peers.len());
        for peer in peers {
            // Entradas repetidas -> un solo nodo
            if !unique.iter().any(|p| p.as_ref() == &peer) {
                unique.push(Arc::new(peer));
            }
        }

        let mut ring = BTreeMap::new();
        for peer in &unique {
            for i in 0..vnodes {
                let vnode_key = format!("{peer}#{i}");

                // Primera en llegar se queda la posición
                if let Entry::Vacant(v) = ring.entry(hash_u64(&vnode_key)) {
                    v.insert(peer.clone());
                }
            }
        }

        debug!(peers = unique.len(), positions = ring.len(), "hash ring built");

        Ok(Self {
            ring,
            peers: unique,
        })
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn contains(&self, peer: &PeerId) -> bool {
        self.peers.iter().any(|p| p.as_ref() == peer)
    }
}

#[inline]
fn hash_u64(key: &str) -> u64 {
    let mut h = DefaultHasher::new();
    key.hash(&mut h);
    h.finish()
}

impl HashRingService for VnodeHashRingService {
    fn create_hash(&self, key: &str) -> u64 {
        hash_u64(key)
    }

    fn locate(&self, hash: u64) -> Arc<PeerId> {
        self.ring
            .range(hash..)
            .next()
            .or_else(|| self.ring.iter().next())
            .map(|(_, peer)| peer.clone())
            // from_peers nunca deja el anillo vacío
            .unwrap_or_else(|| self.peers[0].clone())
    }
}

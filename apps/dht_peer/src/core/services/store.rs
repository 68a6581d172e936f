use std::{borrow::Borrow, hash::Hash, sync::Arc};

use dashmap::{DashMap, Entry};

#[derive(Clone)]
pub(crate) struct StoreEntry<V> {
    pub value: Arc<V>,
    pub version: u64,
}

impl<V> StoreEntry<V> {
    #[inline]
    pub fn new(value: V, version: u64) -> Self {
        Self {
            value: Arc::new(value),
            version,
        }
    }
}

/// The peer's local key-value map.
///
/// Each mutation holds the shard lock of its key for its whole duration, so
/// concurrent writers to one key are applied one after the other and readers
/// only ever see a complete entry. Keys in different shards do not contend.
pub struct Store<K: Eq + Hash, V> {
    pub(crate) map: DashMap<K, StoreEntry<V>>,
}

impl<K: Eq + Hash, V> Store<K, V> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            map: DashMap::new(),
        })
    }

    pub fn put(&self, key: K, value: V) -> bool {
        match self.map.entry(key) {
            Entry::Occupied(mut occ) => {
                let next_ver = occ.get().version.saturating_add(1);
                *occ.get_mut() = StoreEntry::new(value, next_ver);
            }
            Entry::Vacant(vac) => {
                vac.insert(StoreEntry::new(value, 1));
            }
        }

        true
    }

    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).map(|entry| entry.value.clone())
    }

    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

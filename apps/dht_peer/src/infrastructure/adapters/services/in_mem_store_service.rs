use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{domain::services::StoreService, services::Store};

pub struct InMemStoreService {
    store: Arc<Store<String, String>>,
}

impl InMemStoreService {
    pub fn new() -> Self {
        Self {
            store: Store::new(),
        }
    }
}

impl Default for InMemStoreService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreService for InMemStoreService {
    async fn put(&self, key: String, value: String) -> bool {
        self.store.put(key, value)
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.store.get(key).map(|entry| (*entry).clone())
    }

    async fn delete(&self, key: &str) -> bool {
        self.store.delete(key)
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}

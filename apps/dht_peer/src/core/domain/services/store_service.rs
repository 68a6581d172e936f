use async_trait::async_trait;

#[async_trait]
pub trait StoreService: Send + Sync {
    async fn put(&self, key: String, value: String) -> bool;
    async fn get(&self, key: &str) -> Option<String>;
    async fn delete(&self, key: &str) -> bool;
    fn len(&self) -> usize;
}

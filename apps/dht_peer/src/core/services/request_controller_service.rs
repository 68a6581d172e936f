use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::domain::{
    models::{OpStatus, Operation, OperationKind},
    services::StoreService,
};

/// Applies operations to this peer's store.
///
/// Shared by the dispatcher (operations this peer owns) and the listener
/// (operations other peers routed here), so both paths behave the same.
pub struct RequestControllerService {
    store: Arc<dyn StoreService>,
}

impl RequestControllerService {
    pub fn new(store: Arc<dyn StoreService>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, operation: &Operation) -> OpStatus {
        let key = operation.key();

        let status = match operation.kind() {
            OperationKind::Put => match operation.value() {
                Some(value) => OpStatus::Flag(self.store.put(key.to_string(), value.to_string()).await),
                None => OpStatus::Flag(false),
            },
            OperationKind::Get => OpStatus::Value(self.store.get(key).await),
            OperationKind::Delete => OpStatus::Flag(self.store.delete(key).await),
            OperationKind::Unknown(other) => {
                warn!(role = "server", operation = %other, "unsupported operation");
                OpStatus::Unsupported
            }
        };

        debug!(role = "server", "{} : Status => {}", operation.kind(), status);

        status
    }
}

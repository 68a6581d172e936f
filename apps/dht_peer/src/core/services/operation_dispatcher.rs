use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{
    domain::{
        models::{AppError, OpStatus, Operation, OperationKind, OperationResult, PeerId},
        services::{HashRingService, NetworkService},
    },
    services::RequestControllerService,
};

/// Entry point for every locally initiated operation.
///
/// Resolves the key's owner on the ring. Operations owned by this peer run
/// against the local store, the rest go out through the network service and
/// suspend until their result (or failure) comes back. Dispatches never wait
/// on each other.
pub struct OperationDispatcher {
    self_id: Arc<PeerId>,
    hasher_service: Arc<dyn HashRingService>,
    network_service: Arc<dyn NetworkService>,
    controller: Arc<RequestControllerService>,
}

impl OperationDispatcher {
    pub fn new(
        self_id: Arc<PeerId>,
        hasher_service: Arc<dyn HashRingService>,
        network_service: Arc<dyn NetworkService>,
        controller: Arc<RequestControllerService>,
    ) -> Self {
        Self {
            self_id,
            hasher_service,
            network_service,
            controller,
        }
    }

    pub fn self_id(&self) -> &Arc<PeerId> {
        &self.self_id
    }

    pub fn owner_of(&self, key: &str) -> Arc<PeerId> {
        self.hasher_service.lookup(key)
    }

    pub async fn dispatch(&self, operation: Operation) -> Result<OperationResult, AppError> {
        if let OperationKind::Unknown(other) = operation.kind() {
            debug!(role = "client", operation = %other, "unsupported operation, not routed");
            return Ok(OperationResult::local(
                OpStatus::Unsupported,
                operation.issued_at(),
            ));
        }

        let hash = self.hasher_service.create_hash(operation.key());
        let owner = self.hasher_service.locate(hash);
        trace!(key = operation.key(), hash, %owner, "owner resolved");

        if owner == self.self_id {
            let status = self.controller.handle(&operation).await;
            return Ok(OperationResult::local(status, operation.issued_at()));
        }

        debug!(role = "client", %owner, "{} {} delegated", operation.kind(), operation.key());

        self.network_service
            .request_operation(&owner, &operation)
            .await
    }
}

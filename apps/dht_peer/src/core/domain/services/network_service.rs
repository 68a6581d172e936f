use std::sync::Arc;

use async_trait::async_trait;

use crate::core::domain::models::{AppError, Operation, OperationResult, PeerId};

#[async_trait]
pub trait NetworkService: Send + Sync {
    /// Sends `operation` to `peer` over the shared connection and waits for
    /// its result.
    async fn request_operation(
        &self,
        peer: &Arc<PeerId>,
        operation: &Operation,
    ) -> Result<OperationResult, AppError>;

    fn is_connected(&self, peer: &PeerId) -> bool;

    fn connection_count(&self) -> usize;
}

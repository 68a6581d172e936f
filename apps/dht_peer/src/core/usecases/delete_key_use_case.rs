use std::sync::Arc;

use async_trait::async_trait;
use dht_core::{UseCase, UseCaseValidatable, clock::Clock, utils::is_blank};
use tracing::info;

use crate::core::{
    domain::models::{
        AppError, Operation,
        usecases::{DeleteKeyUseCaseInput, DeleteKeyUseCaseOutput},
    },
    services::OperationDispatcher,
};

pub struct DeleteKeyUseCase {
    dispatcher: Arc<OperationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl DeleteKeyUseCase {
    pub fn new(dispatcher: Arc<OperationDispatcher>, clock: Arc<dyn Clock>) -> Self {
        Self { dispatcher, clock }
    }
}

#[async_trait]
impl UseCase<DeleteKeyUseCaseInput, DeleteKeyUseCaseOutput, AppError> for DeleteKeyUseCase {
    async fn execute(
        &self,
        input: DeleteKeyUseCaseInput,
    ) -> Result<DeleteKeyUseCaseOutput, AppError> {
        let operation = Operation::delete(input.key, self.clock.now_millis())?;

        let result = self.dispatcher.dispatch(operation).await?;
        let latency_ms = self.clock.elapsed_since(&result.issued_at);

        info!(role = "client", "DELETE : Status => {}", result.status);

        Ok(DeleteKeyUseCaseOutput {
            success: result.is_success(),
            latency_ms,
        })
    }
}

#[async_trait]
impl UseCaseValidatable<DeleteKeyUseCaseInput, DeleteKeyUseCaseOutput, AppError>
    for DeleteKeyUseCase
{
    async fn validate(&self, input: &DeleteKeyUseCaseInput) -> Result<(), AppError> {
        if is_blank(&input.key) {
            return Err(AppError::BadRequest("Key is empty".to_string()));
        }

        Ok(())
    }
}

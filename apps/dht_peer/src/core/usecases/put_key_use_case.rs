use std::sync::Arc;

use async_trait::async_trait;
use dht_core::{UseCase, UseCaseValidatable, clock::Clock, utils::is_blank};
use tracing::info;

use crate::core::{
    domain::models::{
        AppError, Operation,
        usecases::{PutKeyUseCaseInput, PutKeyUseCaseOutput},
    },
    services::OperationDispatcher,
};

pub struct PutKeyUseCase {
    dispatcher: Arc<OperationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl PutKeyUseCase {
    pub fn new(dispatcher: Arc<OperationDispatcher>, clock: Arc<dyn Clock>) -> Self {
        Self { dispatcher, clock }
    }
}

#[async_trait]
impl UseCase<PutKeyUseCaseInput, PutKeyUseCaseOutput, AppError> for PutKeyUseCase {
    async fn execute(&self, input: PutKeyUseCaseInput) -> Result<PutKeyUseCaseOutput, AppError> {
        let operation = Operation::put(input.key, input.value, self.clock.now_millis())?;

        let result = self.dispatcher.dispatch(operation).await?;
        let latency_ms = self.clock.elapsed_since(&result.issued_at);

        info!(role = "client", "PUT : Status => {}", result.status);

        Ok(PutKeyUseCaseOutput {
            success: result.is_success(),
            latency_ms,
        })
    }
}

#[async_trait]
impl UseCaseValidatable<PutKeyUseCaseInput, PutKeyUseCaseOutput, AppError> for PutKeyUseCase {
    async fn validate(&self, input: &PutKeyUseCaseInput) -> Result<(), AppError> {
        if is_blank(&input.key) {
            return Err(AppError::BadRequest("Key is empty".to_string()));
        }

        if is_blank(&input.value) {
            return Err(AppError::BadRequest("Value is empty".to_string()));
        }

        Ok(())
    }
}

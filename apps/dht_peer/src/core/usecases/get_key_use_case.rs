use std::sync::Arc;

use async_trait::async_trait;
use dht_core::{UseCase, UseCaseValidatable, clock::Clock, utils::is_blank};
use tracing::info;

use crate::core::{
    domain::models::{
        AppError, Operation,
        usecases::{GetKeyUseCaseInput, GetKeyUseCaseOutput},
    },
    services::OperationDispatcher,
};

pub struct GetKeyUseCase {
    dispatcher: Arc<OperationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl GetKeyUseCase {
    pub fn new(dispatcher: Arc<OperationDispatcher>, clock: Arc<dyn Clock>) -> Self {
        Self { dispatcher, clock }
    }
}

#[async_trait]
impl UseCase<GetKeyUseCaseInput, GetKeyUseCaseOutput, AppError> for GetKeyUseCase {
    async fn execute(&self, input: GetKeyUseCaseInput) -> Result<GetKeyUseCaseOutput, AppError> {
        let operation = Operation::get(input.key, self.clock.now_millis())?;

        let result = self.dispatcher.dispatch(operation).await?;
        let latency_ms = self.clock.elapsed_since(&result.issued_at);

        info!(role = "client", "GET : Status => {}", result.status);

        Ok(GetKeyUseCaseOutput {
            value: result.value().map(str::to_string),
            latency_ms,
        })
    }
}

#[async_trait]
impl UseCaseValidatable<GetKeyUseCaseInput, GetKeyUseCaseOutput, AppError> for GetKeyUseCase {
    async fn validate(&self, input: &GetKeyUseCaseInput) -> Result<(), AppError> {
        if is_blank(&input.key) {
            return Err(AppError::BadRequest("Key is empty".to_string()));
        }

        Ok(())
    }
}

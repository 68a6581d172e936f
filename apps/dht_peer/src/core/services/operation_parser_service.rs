use dht_core::clock::AppTime;
use dht_net::{RequestData, RequestDataInput};

use crate::core::domain::models::{AppError, Operation, OperationKind};

pub struct OperationParserService;

impl OperationParserService {
    /// Turns an inbound wire request into an [`Operation`].
    ///
    /// Unknown operation names are kept as [`OperationKind::Unknown`]; a blank
    /// key or a PUT without a value is a protocol error.
    pub fn parse(data: &RequestData) -> Result<Operation, AppError> {
        Operation::new(
            OperationKind::from(data.operation.as_str()),
            data.params.key.clone(),
            data.params.value.clone(),
            AppTime::new(data.timestamp),
        )
        .map_err(|e| {
            AppError::Protocol(format!(
                "request {} rejected: {e}",
                data.correlation_id
            ))
        })
    }

    pub fn to_request(operation: &Operation) -> RequestDataInput<'_> {
        RequestDataInput::new(
            operation.kind().as_str(),
            operation.key(),
            operation.value(),
            operation.issued_at().as_millis_u64(),
        )
    }
}

#[cfg(test)]
mod tests {
    use dht_core::{UseCase, UseCaseValidatable};
    use std::sync::Arc;

    use crate::core::domain::models::{AppError, OpStatus, usecases::GetKeyUseCaseInput};
    use crate::core::services::{OperationDispatcher, RequestControllerService};
    use crate::core::usecases::GetKeyUseCase;
    use crate::tests::test_mocks::{MockClock, MockNetwork, MockRing, MockStore, peer};

    fn use_case(network: MockNetwork, remote: bool) -> (Arc<MockStore>, GetKeyUseCase) {
        let self_id = peer("10.0.0.1", 4000);
        let owner = if remote {
            peer("10.0.0.3", 4000)
        } else {
            self_id.clone()
        };

        let store = Arc::new(MockStore::new());
        let dispatcher = Arc::new(OperationDispatcher::new(
            self_id,
            Arc::new(MockRing::owned_by(owner)),
            Arc::new(network),
            Arc::new(RequestControllerService::new(store.clone())),
        ));

        let uc = GetKeyUseCase::new(dispatcher, Arc::new(MockClock::new(500)));
        (store, uc)
    }

    #[tokio::test]
    async fn validate_fails_when_key_is_blank() {
        let (_, uc) = use_case(MockNetwork::new(), false);

        let input = GetKeyUseCaseInput { key: "\n".into() };
        match uc.validate(&input).await.unwrap_err() {
            AppError::BadRequest(msg) => assert_eq!(msg, "Key is empty"),
            other => panic!("Esperaba BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn execute_reads_the_local_store() {
        let (store, uc) = use_case(MockNetwork::new(), false);
        store.store.lock().insert("k".into(), "v".into());

        let out = uc
            .validate_and_execute(GetKeyUseCaseInput { key: "k".into() })
            .await
            .unwrap();

        assert_eq!(out.value.as_deref(), Some("v"));
        assert_eq!(out.latency_ms, 0);
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let (_, uc) = use_case(MockNetwork::new(), false);

        let out = uc
            .execute(GetKeyUseCaseInput { key: "nope".into() })
            .await
            .unwrap();

        assert_eq!(out.value, None);
    }

    #[tokio::test]
    async fn execute_returns_the_remote_value() {
        let (_, uc) = use_case(
            MockNetwork::replying(OpStatus::Value(Some("alice".into()))),
            true,
        );

        let out = uc
            .execute(GetKeyUseCaseInput {
                key: "user:1".into(),
            })
            .await
            .unwrap();

        assert_eq!(out.value.as_deref(), Some("alice"));
    }
}

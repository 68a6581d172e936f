use std::sync::Arc;

use dht_core::clock::{AppClock, Clock};
use tracing::{info, warn};

use crate::{
    core::{
        domain::models::{AppError, PeerId},
        services::{OperationDispatcher, RequestControllerService},
        usecases::{DeleteKeyUseCase, GetKeyUseCase, PutKeyUseCase},
    },
    infrastructure::{
        adapters::{
            controllers::PeerListener,
            services::{InMemStoreService, TcpNetworkService, VnodeHashRingService},
        },
        app_state::AppNetworkState,
        config::PeerConfig,
    },
};

/// Everything one peer needs, wired together. Several modules can live in
/// the same process since none of them touches global state.
pub struct PeerModule {
    pub self_id: Arc<PeerId>,
    pub store_service: Arc<InMemStoreService>,
    pub hash_ring_service: Arc<VnodeHashRingService>,
    pub network_state: Arc<AppNetworkState>,
    pub tcp_network_service: Arc<TcpNetworkService>,
    pub dispatcher: Arc<OperationDispatcher>,
    pub peer_listener: Arc<PeerListener>,
    pub put_key_use_case: Arc<PutKeyUseCase>,
    pub get_key_use_case: Arc<GetKeyUseCase>,
    pub delete_key_use_case: Arc<DeleteKeyUseCase>,
}

impl PeerModule {
    pub fn build(cfg: &PeerConfig, peers: Vec<PeerId>) -> Result<Self, AppError> {
        let self_id = Arc::new(cfg.self_id()?);
        let clock: Arc<dyn Clock> = Arc::new(AppClock::new());

        let hash_ring_service = Arc::new(VnodeHashRingService::from_peers(peers, cfg.vnodes)?);
        if !hash_ring_service.contains(&self_id) {
            warn!(%self_id, "this peer is not in the peer list and will own no keys");
        }

        let store_service = Arc::new(InMemStoreService::new());
        let controller = Arc::new(RequestControllerService::new(store_service.clone()));

        let network_state = AppNetworkState::new_shared();
        let tcp_network_service = Arc::new(TcpNetworkService::from_state(
            self_id.clone(),
            network_state.clone(),
            cfg.connect_timeout,
            cfg.request_timeout,
        ));

        let dispatcher = Arc::new(OperationDispatcher::new(
            self_id.clone(),
            hash_ring_service.clone(),
            tcp_network_service.clone(),
            controller.clone(),
        ));

        let peer_listener = Arc::new(PeerListener::new(
            self_id.clone(),
            controller,
            cfg.connect_timeout,
        ));

        let put_key_use_case = Arc::new(PutKeyUseCase::new(dispatcher.clone(), clock.clone()));
        let get_key_use_case = Arc::new(GetKeyUseCase::new(dispatcher.clone(), clock.clone()));
        let delete_key_use_case = Arc::new(DeleteKeyUseCase::new(dispatcher.clone(), clock));

        info!(%self_id, peers = hash_ring_service.len(), "peer module ready");

        Ok(Self {
            self_id,
            store_service,
            hash_ring_service,
            network_state,
            tcp_network_service,
            dispatcher,
            peer_listener,
            put_key_use_case,
            get_key_use_case,
            delete_key_use_case,
        })
    }
}

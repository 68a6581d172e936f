pub mod hash_ring_service;
pub mod network_service;
pub mod store_service;

pub use hash_ring_service::HashRingService;
pub use network_service::NetworkService;
pub use store_service::StoreService;

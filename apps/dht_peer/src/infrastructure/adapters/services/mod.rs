pub mod in_mem_store_service;
pub mod tcp_network_service;
pub mod vnode_hash_ring_service;

pub use in_mem_store_service::InMemStoreService;
pub use tcp_network_service::TcpNetworkService;
pub use vnode_hash_ring_service::VnodeHashRingService;

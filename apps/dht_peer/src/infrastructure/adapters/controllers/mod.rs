pub mod peer_listener;

pub use peer_listener::PeerListener;

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use dht_core::utils::generate_short_id;

    use crate::core::domain::models::{AppError, PeerId};
    use crate::infrastructure::adapters::services::VnodeHashRingService;
    use crate::infrastructure::config::{
        BenchConfig, PeerConfig, RunMode, load_peer_list, parse_peer_list,
    };

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg =
            PeerConfig::from_lookup(lookup(&[("PEERS_FILE", "peers.txt"), ("PEER_PORT", "4000")]))
                .unwrap();

        assert_eq!(cfg.peers_file, "peers.txt");
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert_eq!(cfg.vnodes, 128);
        assert_eq!(cfg.mode, RunMode::Interactive);
        assert_eq!(cfg.bench, BenchConfig::default());
        assert_eq!(cfg.self_id().unwrap(), PeerId::new("127.0.0.1", 4000).unwrap());
        assert_eq!(cfg.bind_addr().unwrap().to_string(), "0.0.0.0:4000");
    }

    #[test]
    fn every_variable_is_read() {
        let cfg = PeerConfig::from_lookup(lookup(&[
            ("PEERS_FILE", "p"),
            ("PEER_HOST", "10.0.0.5"),
            ("PEER_PORT", "4100"),
            ("PEER_BIND", "127.0.0.1"),
            ("CONNECT_TIMEOUT_MS", "250"),
            ("REQUEST_TIMEOUT_MS", "1500"),
            ("RING_VNODES", "16"),
            ("PEER_MODE", "Bench"),
            ("BENCH_KEY_RANGE", "10"),
            ("BENCH_ITERATIONS", "1000"),
        ]))
        .unwrap();

        assert_eq!(cfg.host, "10.0.0.5");
        assert_eq!(cfg.connect_timeout, Duration::from_millis(250));
        assert_eq!(cfg.request_timeout, Duration::from_millis(1500));
        assert_eq!(cfg.vnodes, 16);
        assert_eq!(cfg.mode, RunMode::Bench);
        assert_eq!(
            cfg.bench,
            BenchConfig {
                key_range: 10,
                iterations: 1000
            }
        );
        assert_eq!(cfg.bind_addr().unwrap().to_string(), "127.0.0.1:4100");
    }

    #[test]
    fn missing_or_bad_values_are_config_errors() {
        let cases: Vec<Vec<(&str, &str)>> = vec![
            vec![("PEER_PORT", "4000")],
            vec![("PEERS_FILE", "p")],
            vec![("PEERS_FILE", "p"), ("PEER_PORT", "70000")],
            vec![("PEERS_FILE", "p"), ("PEER_PORT", "4000"), ("PEER_HOST", "192.168.1.999")],
            vec![("PEERS_FILE", "p"), ("PEER_PORT", "4000"), ("PEER_MODE", "daemon")],
            vec![("PEERS_FILE", "p"), ("PEER_PORT", "4000"), ("REQUEST_TIMEOUT_MS", "soon")],
            vec![("PEERS_FILE", "p"), ("PEER_PORT", "4000"), ("BENCH_KEY_RANGE", "0")],
            vec![("PEERS_FILE", "p"), ("PEER_PORT", "4000"), ("BENCH_ITERATIONS", "0")],
        ];

        for vars in cases {
            assert!(
                matches!(PeerConfig::from_lookup(lookup(&vars)), Err(AppError::Config(_))),
                "expected config error for {vars:?}"
            );
        }
    }

    #[test]
    fn peer_list_skips_blank_lines() {
        let peers = parse_peer_list("192.168.1.1 4000\n\n  \n192.168.1.2 4001\n").unwrap();

        assert_eq!(
            peers,
            vec![
                PeerId::new("192.168.1.1", 4000).unwrap(),
                PeerId::new("192.168.1.2", 4001).unwrap(),
            ]
        );
    }

    #[test]
    fn one_bad_line_rejects_the_list() {
        for content in [
            "192.168.1.1 4000\n192.168.1.999 4000\n",
            "192.168.1.1 4000\n192.168.1.2\n",
            "localhost 4000\n",
            "010.0.0.1 4000\n",
        ] {
            assert!(matches!(parse_peer_list(content), Err(AppError::Config(_))));
        }
    }

    #[test]
    fn empty_list_is_a_config_error() {
        assert!(matches!(parse_peer_list(""), Err(AppError::Config(_))));
        assert!(matches!(parse_peer_list("\n \n"), Err(AppError::Config(_))));
    }

    #[test]
    fn duplicated_entries_build_a_ring_with_one_node_each() {
        let peers = parse_peer_list("10.0.0.1 4000\n10.0.0.1 4000\n10.0.0.2 4000\n").unwrap();
        assert_eq!(peers.len(), 3);

        let ring = VnodeHashRingService::from_peers(peers, 8).unwrap();
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn loads_peer_list_from_a_file() {
        let path = std::env::temp_dir().join(format!("dht-peers-{}.txt", generate_short_id(10)));
        std::fs::write(&path, "127.0.0.1 4000\n127.0.0.1 4001\n127.0.0.1 4002\n").unwrap();

        let peers = load_peer_list(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(peers.len(), 3);
        assert_eq!(peers[2].port(), 4002);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let path = std::env::temp_dir().join(format!("dht-missing-{}.txt", generate_short_id(10)));
        assert!(matches!(load_peer_list(&path), Err(AppError::Config(_))));
    }
}

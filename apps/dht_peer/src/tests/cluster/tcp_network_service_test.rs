#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use dht_core::UseCaseValidatable;
    use dht_net::{ParsedMsg, ResponseData, ResponseStatus, parse_line};
    use tokio::{
        io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
        net::TcpListener,
        time::sleep,
    };

    use crate::core::domain::{
        models::{AppError, PeerId, usecases::PutKeyUseCaseInput},
        services::NetworkService,
    };
    use crate::infrastructure::di::PeerModule;
    use crate::tests::cluster::harness::{LOCALHOST, fake_peer, key_owned_by, lone_module};

    async fn put_to(module: &PeerModule, owner: &PeerId) -> Result<bool, AppError> {
        let key = key_owned_by(module, &Arc::new(owner.clone()), "k");

        module
            .put_key_use_case
            .validate_and_execute(PutKeyUseCaseInput {
                key,
                value: "v".into(),
            })
            .await
            .map(|out| out.success)
    }

    async fn wait_disconnected(module: &PeerModule, peer: &PeerId) {
        for _ in 0..100 {
            if module.network_state.connections.is_empty() && !module.tcp_network_service.is_connected(peer) {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("connection to {peer} was never dropped");
    }

    #[tokio::test]
    async fn silent_peer_times_out_without_leaking_pending_entries() {
        let (fake, _task) = fake_peer(|mut reader, _writer| async move {
            let mut line = String::new();
            while reader.read_line(&mut line).await.unwrap_or(0) > 0 {
                line.clear();
            }
        })
        .await;

        let module = lone_module(&[fake.clone()], Duration::from_millis(200));

        let err = put_to(&module, &fake).await.unwrap_err();
        match err {
            AppError::Timeout { peer, .. } => assert_eq!(peer, fake.to_string()),
            other => panic!("expected Timeout, got {other:?}"),
        }

        let conn = module.network_state.established(&fake).unwrap();
        assert_eq!(conn.socket.pending_len(), 0);
        assert!(conn.is_alive());
    }

    #[tokio::test]
    async fn peer_closing_mid_request_fails_the_request() {
        let (fake, _task) = fake_peer(|mut reader, writer| async move {
            let mut line = String::new();
            reader.read_line(&mut line).await.unwrap();
            drop(writer);
            drop(reader);
        })
        .await;

        let module = lone_module(&[fake.clone()], Duration::from_secs(5));

        let err = put_to(&module, &fake).await.unwrap_err();
        assert!(matches!(err, AppError::ConnectionClosed(_)), "got {err:?}");

        wait_disconnected(&module, &fake).await;
    }

    #[tokio::test]
    async fn refused_connection_is_a_connect_error() {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let dead = PeerId::new(LOCALHOST, listener.local_addr().unwrap().port()).unwrap();
        drop(listener);

        let module = lone_module(&[dead.clone()], Duration::from_secs(1));

        let err = put_to(&module, &dead).await.unwrap_err();
        assert!(matches!(err, AppError::Connect { .. }), "got {err:?}");
        assert!(module.network_state.established(&dead).is_none());
        assert_eq!(module.tcp_network_service.connection_count(), 0);
    }

    #[tokio::test]
    async fn handshake_without_ack_is_a_connect_error() {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let peer = PeerId::new(LOCALHOST, listener.local_addr().unwrap().port()).unwrap();

        let _task = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (reader, mut writer) = stream.into_split();
            let mut reader = BufReader::new(reader);
            let mut hello = String::new();
            reader.read_line(&mut hello).await.unwrap();
            writer.write_all(b"WHO ARE YOU\n").await.unwrap();
        });

        let module = lone_module(&[peer.clone()], Duration::from_secs(1));

        let err = put_to(&module, &peer).await.unwrap_err();
        assert!(matches!(err, AppError::Connect { .. }), "got {err:?}");
        assert!(module.network_state.established(&peer).is_none());
    }

    #[tokio::test]
    async fn next_call_reconnects_after_the_connection_dies() {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let peer = PeerId::new(LOCALHOST, listener.local_addr().unwrap().port()).unwrap();
        let entry = peer.entry();

        let _task = tokio::spawn(async move {
            for attempt in 0..2 {
                let (stream, _) = listener.accept().await.unwrap();
                let (reader, mut writer) = stream.into_split();
                let mut reader = BufReader::new(reader);

                let mut line = String::new();
                reader.read_line(&mut line).await.unwrap();
                writer
                    .write_all(format!("ACK {entry}\n").as_bytes())
                    .await
                    .unwrap();

                line.clear();
                reader.read_line(&mut line).await.unwrap();

                // Primer intento: se corta sin responder
                if attempt == 0 {
                    continue;
                }

                let ParsedMsg::Req { data } = parse_line(&line).unwrap() else {
                    panic!("expected a request, got {line:?}");
                };
                let reply = ResponseData::new(
                    data.correlation_id,
                    Some(ResponseStatus::Flag(true)),
                    data.timestamp,
                );
                writer
                    .write_all(reply.to_line().unwrap().as_bytes())
                    .await
                    .unwrap();

                // Mantiene la conexión abierta hasta que el cliente cierre
                line.clear();
                let _ = reader.read_line(&mut line).await;
            }
        });

        let module = lone_module(&[peer.clone()], Duration::from_secs(5));

        let first = put_to(&module, &peer).await;
        assert!(matches!(first, Err(AppError::ConnectionClosed(_))), "got {first:?}");

        wait_disconnected(&module, &peer).await;

        assert!(put_to(&module, &peer).await.unwrap());
        assert_eq!(module.tcp_network_service.connection_count(), 1);
    }
}

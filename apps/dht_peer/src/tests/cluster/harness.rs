use std::{net::SocketAddr, sync::Arc, time::Duration};

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        TcpListener, TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    task::JoinHandle,
};

use crate::{
    core::domain::models::{AppError, PeerId},
    infrastructure::{config::PeerConfig, di::PeerModule},
};

pub const LOCALHOST: &str = "127.0.0.1";

/// Several peers in one process, each listening on its own loopback port.
pub struct Cluster {
    pub peers: Vec<PeerModule>,
    tasks: Vec<JoinHandle<Result<(), AppError>>>,
}

impl Drop for Cluster {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

impl Cluster {
    pub async fn start(n: usize) -> Self {
        let mut listeners = Vec::with_capacity(n);
        for _ in 0..n {
            listeners.push(TcpListener::bind((LOCALHOST, 0)).await.unwrap());
        }

        let ids: Vec<PeerId> = listeners
            .iter()
            .map(|l| PeerId::new(LOCALHOST, l.local_addr().unwrap().port()).unwrap())
            .collect();

        let mut peers = Vec::with_capacity(n);
        let mut tasks = Vec::with_capacity(n);

        for (listener, id) in listeners.into_iter().zip(&ids) {
            let module = PeerModule::build(&config(id.port(), Duration::from_secs(2)), ids.clone())
                .unwrap();
            tasks.push(tokio::spawn(module.peer_listener.clone().run(listener)));
            peers.push(module);
        }

        Self { peers, tasks }
    }

    /// Index of the peer owning `key`.
    pub fn owner_index(&self, key: &str) -> usize {
        let owner = self.peers[0].dispatcher.owner_of(key);
        self.peers
            .iter()
            .position(|p| p.self_id == owner)
            .unwrap()
    }
}

pub fn config(port: u16, request_timeout: Duration) -> PeerConfig {
    PeerConfig {
        host: LOCALHOST.to_string(),
        port,
        connect_timeout: Duration::from_secs(2),
        request_timeout,
        ..PeerConfig::default()
    }
}

/// First key of the form `<prefix><n>` that `module` routes to `owner`.
pub fn key_owned_by(module: &PeerModule, owner: &Arc<PeerId>, prefix: &str) -> String {
    (0..100_000)
        .map(|i| format!("{prefix}{i}"))
        .find(|key| module.dispatcher.owner_of(key) == *owner)
        .unwrap()
}

/// Raw connection that already went through the handshake.
pub async fn handshake(addr: SocketAddr) -> (BufReader<OwnedReadHalf>, OwnedWriteHalf) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);

    writer.write_all(b"HELLO 127.0.0.1 1\n").await.unwrap();

    let mut ack = String::new();
    reader.read_line(&mut ack).await.unwrap();
    assert!(ack.starts_with("ACK "), "unexpected handshake reply: {ack:?}");

    (reader, writer)
}

/// Accepts one connection, acknowledges the handshake, then hands the
/// stream to `behaviour`.
pub async fn fake_peer<F, Fut>(behaviour: F) -> (PeerId, JoinHandle<()>)
where
    F: FnOnce(BufReader<OwnedReadHalf>, OwnedWriteHalf) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let id = PeerId::new(LOCALHOST, listener.local_addr().unwrap().port()).unwrap();
    let entry = id.entry();

    let task = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        let mut hello = String::new();
        reader.read_line(&mut hello).await.unwrap();
        assert!(hello.starts_with("HELLO "));

        writer
            .write_all(format!("ACK {entry}\n").as_bytes())
            .await
            .unwrap();

        behaviour(reader, writer).await;
    });

    (id, task)
}

/// Peer module that is not listening, wired to `self_id` plus `others`.
pub fn lone_module(others: &[PeerId], request_timeout: Duration) -> PeerModule {
    let self_id = PeerId::new(LOCALHOST, 1).unwrap();
    let mut ids = vec![self_id];
    ids.extend_from_slice(others);

    PeerModule::build(&config(1, request_timeout), ids).unwrap()
}

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use dht_net::{ParsedMsg, Socket, message::hello_line, parse_line, socket::spawn_writer};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpStream, tcp::OwnedReadHalf},
    time::timeout,
};
use tracing::{debug, info, warn};

use crate::{
    core::{
        domain::{
            models::{AppError, Operation, OperationResult, PeerId},
            services::NetworkService,
        },
        services::OperationParserService,
    },
    infrastructure::app_state::{AppNetworkState, ConnectionSlot, PeerConnection},
};

/// Outbound side of the peer network: one multiplexed connection per remote
/// peer, opened on first use and kept until the transport fails.
pub struct TcpNetworkService {
    self_id: Arc<PeerId>,
    network_state: Arc<AppNetworkState>,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl TcpNetworkService {
    #[inline]
    pub fn from_state(
        self_id: Arc<PeerId>,
        network_state: Arc<AppNetworkState>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Self {
        Self {
            self_id,
            network_state,
            connect_timeout,
            request_timeout,
        }
    }

    /// Returns the live connection to `peer`, opening it if needed.
    ///
    /// Concurrent callers for the same peer share one connection attempt. A
    /// failed attempt is reported to every caller that waited on it and
    /// leaves the slot empty; the manager never retries by itself.
    pub async fn get_or_create(&self, peer: &Arc<PeerId>) -> Result<Arc<Socket>, AppError> {
        let slot = self.network_state.slot(peer);
        let conn = self.establish(peer, &slot).await?;

        if conn.is_alive() {
            return Ok(conn.socket.clone());
        }

        // La conexión murió: se reemplaza por una nueva
        debug!(role = "client", %peer, "replacing dead connection");
        conn.shutdown();
        self.network_state.evict(peer, &slot);

        let slot = self.network_state.slot(peer);
        let conn = self.establish(peer, &slot).await?;
        Ok(conn.socket.clone())
    }

    async fn establish(
        &self,
        peer: &Arc<PeerId>,
        slot: &ConnectionSlot,
    ) -> Result<Arc<PeerConnection>, AppError> {
        slot.get_or_try_init(|| async {
            timeout(self.connect_timeout, self.open_connection(peer, slot))
                .await
                .map_err(|_| AppError::connect(peer, "connect timed out"))?
        })
        .await
        .cloned()
    }

    async fn open_connection(
        &self,
        peer: &Arc<PeerId>,
        slot: &ConnectionSlot,
    ) -> Result<Arc<PeerConnection>, AppError> {
        let addr = peer.socket_addr()?;

        info!(role = "client", %peer, "Connecting to peer");

        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| AppError::connect(peer, e))?;
        let _ = stream.set_nodelay(true);

        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        writer
            .write_all(hello_line(&self.self_id.entry()).as_bytes())
            .await
            .map_err(|e| AppError::connect(peer, e))?;

        let mut first_line = String::new();
        let n = reader
            .read_line(&mut first_line)
            .await
            .map_err(|e| AppError::connect(peer, e))?;

        if n == 0 {
            return Err(AppError::connect(peer, "closed during handshake"));
        }

        match parse_line(&first_line) {
            Ok(ParsedMsg::Ack(remote)) if remote == peer.entry() => {}
            Ok(ParsedMsg::Ack(remote)) => {
                warn!(role = "client", %peer, remote, "peer acknowledged with another identity");
            }
            _ => {
                return Err(AppError::connect(
                    peer,
                    format!("unexpected handshake reply: {}", first_line.trim()),
                ));
            }
        }

        let (socket, rx) = Socket::channel(peer.to_string(), self.request_timeout);
        let writer_task = spawn_writer(socket.clone(), writer, rx);
        let reader_task = tokio::spawn(read_responses(
            reader,
            socket.clone(),
            self.network_state.clone(),
            peer.clone(),
            slot.clone(),
        ));

        info!(role = "client", %peer, "Connected to Peer Server !");

        Ok(PeerConnection::new_shared(
            Arc::new(socket),
            writer_task,
            reader_task,
        ))
    }
}

/// Routes replies from `peer` to their waiting callers until the connection
/// ends, then fails whatever is still pending and forgets the connection.
async fn read_responses(
    mut reader: BufReader<OwnedReadHalf>,
    socket: Socket,
    network_state: Arc<AppNetworkState>,
    peer: Arc<PeerId>,
    slot: ConnectionSlot,
) {
    let mut line = String::new();

    loop {
        line.clear();

        match reader.read_line(&mut line).await {
            Ok(0) => {
                info!(role = "client", %peer, "peer closed the connection");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(role = "client", %peer, "read error: {e}");
                break;
            }
        }

        match parse_line(&line) {
            Ok(ParsedMsg::Res { data }) => socket.handle_response(data),
            Ok(ParsedMsg::Other(msg)) if msg.is_empty() => {}
            Ok(_) => {
                warn!(role = "client", %peer, line = line.trim(), "unexpected message on outbound connection");
            }
            Err(e) => {
                warn!(role = "client", %peer, "protocol error, dropping connection: {e}");
                break;
            }
        }
    }

    socket.close();
    network_state.evict(&peer, &slot);
}

#[async_trait]
impl NetworkService for TcpNetworkService {
    async fn request_operation(
        &self,
        peer: &Arc<PeerId>,
        operation: &Operation,
    ) -> Result<OperationResult, AppError> {
        let socket = self.get_or_create(peer).await?;

        let response = socket
            .request(OperationParserService::to_request(operation))
            .await
            .map_err(|e| AppError::from_socket(peer, e))?;

        OperationResult::from_response(operation.kind(), response)
    }

    fn is_connected(&self, peer: &PeerId) -> bool {
        self.network_state
            .established(peer)
            .is_some_and(|conn| conn.is_alive())
    }

    fn connection_count(&self) -> usize {
        self.network_state.established_count()
    }
}

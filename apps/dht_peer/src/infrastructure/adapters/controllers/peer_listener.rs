use std::{net::SocketAddr, sync::Arc, time::Duration};

use dht_net::{
    ParsedMsg, RequestData, ResponseData, Socket, message::ack_line, parse_line,
    socket::spawn_writer,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream, tcp::OwnedReadHalf},
    time::timeout,
};
use tracing::{debug, error, info, warn};

use crate::core::{
    domain::models::{AppError, PeerId},
    services::{OperationParserService, RequestControllerService},
};

/// Serves operations that other peers routed to this one.
pub struct PeerListener {
    self_id: Arc<PeerId>,
    controller: Arc<RequestControllerService>,
    handshake_timeout: Duration,
}

impl PeerListener {
    pub fn new(
        self_id: Arc<PeerId>,
        controller: Arc<RequestControllerService>,
        handshake_timeout: Duration,
    ) -> Self {
        Self {
            self_id,
            controller,
            handshake_timeout,
        }
    }

    /// Accept loop. Only returns if the listener itself fails to be queried.
    pub async fn run(self: Arc<Self>, listener: TcpListener) -> Result<(), AppError> {
        info!(role = "server", addr = %listener.local_addr()?, "Peer Server listening");

        loop {
            let (stream, addr) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    error!(role = "server", "accept error: {e}");
                    continue;
                }
            };

            let this = self.clone();

            tokio::spawn(async move {
                if let Err(e) = this.handle_conn(stream, addr).await {
                    warn!(role = "server", %addr, "connection dropped: {e}");
                }
            });
        }
    }

    async fn handle_conn(&self, stream: TcpStream, addr: SocketAddr) -> Result<(), AppError> {
        let _ = stream.set_nodelay(true);
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        let mut first_line = String::new();
        let remote = match timeout(self.handshake_timeout, reader.read_line(&mut first_line)).await
        {
            Ok(Ok(n)) if n > 0 => match parse_line(&first_line) {
                Ok(ParsedMsg::Hello(identity)) => identity.to_string(),
                _ => {
                    return Err(AppError::Protocol(format!(
                        "expected HELLO, got: {}",
                        first_line.trim()
                    )));
                }
            },
            Ok(Ok(_)) => return Err(AppError::Protocol("closed before HELLO".into())),
            Ok(Err(e)) => return Err(AppError::Io(e)),
            Err(_) => return Err(AppError::Protocol("no HELLO within handshake timeout".into())),
        };

        writer
            .write_all(ack_line(&self.self_id.entry()).as_bytes())
            .await?;

        info!(role = "server", %addr, peer = %remote, "Connected peer");

        // Los timeouts solo aplican a requests salientes; este socket solo responde
        let (socket, rx) = Socket::channel(remote.clone(), self.handshake_timeout);
        let writer_task = spawn_writer(socket.clone(), writer, rx);

        let result = self.receive_loop(&mut reader, &socket, &remote).await;

        socket.close();
        writer_task.abort();

        info!(role = "server", peer = %remote, "Peer disconnected");

        result
    }

    async fn receive_loop(
        &self,
        reader: &mut BufReader<OwnedReadHalf>,
        socket: &Socket,
        remote: &str,
    ) -> Result<(), AppError> {
        let mut line = String::new();

        loop {
            line.clear();

            if reader.read_line(&mut line).await? == 0 {
                return Ok(());
            }

            match parse_line(&line).map_err(|e| AppError::Protocol(e.to_string()))? {
                ParsedMsg::Req { data } => self.serve(socket, data)?,
                ParsedMsg::Other(msg) if msg.is_empty() => {}
                _ => {
                    return Err(AppError::Protocol(format!(
                        "unexpected message from {remote}: {}",
                        line.trim()
                    )));
                }
            }
        }
    }

    /// Runs one inbound request on its own task so slow operations never hold
    /// up the rest of the connection.
    fn serve(&self, socket: &Socket, data: RequestData) -> Result<(), AppError> {
        let operation = OperationParserService::parse(&data)?;

        let controller = self.controller.clone();
        let socket = socket.clone();

        tokio::spawn(async move {
            let status = controller.handle(&operation).await;
            let response = ResponseData::new(data.correlation_id, status.to_wire(), data.timestamp);

            if let Err(e) = socket.send_res(response) {
                debug!(role = "server", socket = %socket.id, "reply not sent: {e}");
            }
        });

        Ok(())
    }
}

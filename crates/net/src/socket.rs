use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::error::SocketError;
use crate::pending::PendingTable;
use crate::request::RequestDataInput;
use crate::response::ResponseData;
use crate::types::{ReqId, SocketResult};

/// Handle to one live connection.
///
/// Writes go through an unbounded channel drained by a writer task, so any
/// number of callers can have requests in flight on the same socket. Replies
/// are matched back through the socket's [`PendingTable`].
#[derive(Clone)]
pub struct Socket {
    pub id: String,
    tx: mpsc::UnboundedSender<Bytes>,
    pending: Arc<PendingTable>,
    counter: Arc<AtomicU64>,
    max_duration: Duration,
}

impl fmt::Debug for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Socket")
            .field("id", &self.id)
            .field("pending", &self.pending.len())
            .finish()
    }
}

/// Drops the pending entry if the waiting future goes away early.
struct PendingGuard<'a> {
    table: &'a PendingTable,
    id: &'a str,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.table.cancel(self.id);
    }
}

impl Socket {
    pub fn new(id: String, tx: mpsc::UnboundedSender<Bytes>, max_duration: Duration) -> Self {
        Self {
            id,
            tx,
            pending: Arc::new(PendingTable::new()),
            counter: Arc::new(AtomicU64::new(1)),
            max_duration,
        }
    }

    /// Builds a socket together with the receiving end of its write channel.
    pub fn channel(id: String, max_duration: Duration) -> (Self, mpsc::UnboundedReceiver<Bytes>) {
        let (tx, rx) = mpsc::unbounded_channel::<Bytes>();
        (Self::new(id, tx, max_duration), rx)
    }

    pub async fn request(&self, input: RequestDataInput<'_>) -> SocketResult<ResponseData> {
        let req_id = self.get_new_id();
        let line = input.from_id(req_id.clone()).to_line()?;

        let rx_resp = self.pending.register(req_id.clone())?;
        let _guard = PendingGuard {
            table: &self.pending,
            id: &req_id,
        };

        debug!(socket = %self.id, %req_id, operation = input.operation, "request sent");

        self.tx
            .send(Bytes::from(line))
            .map_err(|_| SocketError::WriteChannelClosed(self.id.clone()))?;

        let response = timeout(self.max_duration, rx_resp)
            .await
            .map_err(|_| SocketError::Timeout {
                socket_id: self.id.clone(),
                req_id: req_id.clone(),
            })?
            .map_err(|_| SocketError::ResponseChannelClosed {
                socket_id: self.id.clone(),
                req_id: req_id.clone(),
            })?;

        Ok(response)
    }

    // Lo llamamos desde la tarea lectora
    pub fn handle_response(&self, response: ResponseData) {
        let req_id = response.correlation_id.clone();

        if !self.pending.resolve(&req_id, response) {
            warn!(socket = %self.id, %req_id, "response nobody is waiting for");
        }
    }

    // Para responder a una request
    pub fn send_res(&self, response: ResponseData) -> SocketResult<()> {
        let line = response.to_line()?;
        self.send_raw(Bytes::from(line))
    }

    pub fn send_raw(&self, bytes: Bytes) -> SocketResult<()> {
        self.tx
            .send(bytes)
            .map_err(|_| SocketError::WriteChannelClosed(self.id.clone()))
    }

    /// Marks the connection dead. Every caller still waiting gets an error.
    pub fn close(&self) {
        let failed = self.pending.close();
        if failed > 0 {
            warn!(socket = %self.id, failed, "socket closed with requests in flight");
        } else {
            debug!(socket = %self.id, "socket closed");
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.pending.is_closed()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn get_new_id(&self) -> ReqId {
        self.counter.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Forwards queued bytes to `writer` until the channel or the stream fails,
/// then closes `socket`.
pub fn spawn_writer<W>(
    socket: Socket,
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<Bytes>,
) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(bytes) = rx.recv().await {
            if let Err(e) = writer.write_all(&bytes).await {
                error!("[{}] write error: {}", socket.id, e);
                break;
            }
        }
        socket.close();
    })
}

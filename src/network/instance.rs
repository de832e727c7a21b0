use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::codec;
use crate::network::future::JsonRpcFuture;
use crate::network::manager::JsonRpcManager;
use crate::network::message::{JsonRpcId, JsonRpcReply, JsonRpcRequest};
use crate::network::websocket::{self, Outgoing};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::WebSocketStream;

const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// State shared between an [`Instance`] and the futures it hands out.
pub(crate) struct Shared {
    outgoing: mpsc::UnboundedSender<Outgoing>,
    manager: Arc<JsonRpcManager>,
    next_id: AtomicI64,
}

impl Shared {
    /// Next generated ID, skipping integer IDs callers picked through [`Instance::send`].
    fn next_id(&self) -> JsonRpcId {
        loop {
            let id = JsonRpcId::Int(self.next_id.fetch_add(1, Ordering::Relaxed));
            if !self.manager.is_running(&id) {
                return id;
            }
        }
    }

    pub(crate) fn send(
        self: &Arc<Self>,
        request: JsonRpcRequest,
    ) -> BraynsResult<Option<JsonRpcFuture>> {
        let frame = codec::encode_request(&request)?;
        let receivers = match &request.id {
            Some(id) => Some((id.clone(), self.manager.add_task(id.clone())?)),
            None => None,
        };
        tracing::debug!(
            method = %request.method,
            id = ?request.id,
            binary = request.binary.len(),
            "send request"
        );
        if self.outgoing.send(Outgoing::Frame(frame)).is_err() {
            if let Some(id) = &request.id {
                self.manager.remove_task(id);
            }
            return Err(BraynsError::ConnectionClosed);
        }
        Ok(receivers.map(|(id, (reply, progress))| {
            JsonRpcFuture::new(id, reply, progress, Arc::clone(self))
        }))
    }

    pub(crate) fn task(
        self: &Arc<Self>,
        method: &str,
        params: Value,
        binary: Vec<u8>,
    ) -> BraynsResult<JsonRpcFuture> {
        let mut request = JsonRpcRequest::new(self.next_id(), method).with_binary(binary);
        if !params.is_null() {
            request.params = Some(params);
        }
        self.send(request)?
            .ok_or_else(|| BraynsError::protocol("request with id produced no future"))
    }
}

/// Connection to a running service.
///
/// Created by [`crate::Connector::connect`]. Requests can be issued concurrently from several
/// tasks; replies are matched to requests by ID. Dropping the instance aborts the connection.
pub struct Instance {
    shared: Arc<Shared>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("connected", &self.is_connected())
            .field("running", &self.shared.manager.len())
            .finish()
    }
}

impl Instance {
    /// Wrap an already-upgraded client WebSocket.
    ///
    /// Must be called from within a tokio runtime: it spawns the reader and writer tasks.
    pub fn from_websocket<S>(stream: WebSocketStream<S>) -> Self
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let manager = Arc::new(JsonRpcManager::new());
        let (tx, rx) = mpsc::unbounded_channel();
        let (reader, writer) = websocket::spawn(stream, Arc::clone(&manager), rx);
        Self {
            shared: Arc::new(Shared {
                outgoing: tx,
                manager,
                next_id: AtomicI64::new(0),
            }),
            reader,
            writer,
        }
    }

    /// Return `false` once the service side of the connection is gone.
    pub fn is_connected(&self) -> bool {
        !self.reader.is_finished()
    }

    /// Send a request and return its result.
    ///
    /// `params` is omitted from the message when it is `null`.
    #[tracing::instrument(level = "debug", skip(self, params))]
    pub async fn request(&self, method: &str, params: Value) -> BraynsResult<Value> {
        self.task(method, params, Vec::new())?
            .wait_for_result()
            .await
    }

    /// Send a request with a binary payload and return its result.
    pub async fn request_with_binary(
        &self,
        method: &str,
        params: Value,
        binary: Vec<u8>,
    ) -> BraynsResult<Value> {
        self.task(method, params, binary)?.wait_for_result().await
    }

    /// Send a request with typed params and deserialize its result.
    pub async fn request_as<P, R>(&self, method: &str, params: &P) -> BraynsResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params)
            .map_err(|e| BraynsError::serde(format!("encode params of {method}: {e}")))?;
        let result = self.request(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| BraynsError::serde(format!("decode result of {method}: {e}")))
    }

    /// Send a request and return the full reply (result and binary).
    pub async fn execute(
        &self,
        method: &str,
        params: Value,
        binary: Vec<u8>,
    ) -> BraynsResult<JsonRpcReply> {
        self.task(method, params, binary)?.wait_for_reply().await
    }

    /// Send a request and return a handle to follow it.
    pub fn task(&self, method: &str, params: Value, binary: Vec<u8>) -> BraynsResult<JsonRpcFuture> {
        self.shared.task(method, params, binary)
    }

    /// Send a raw request; notifications (no ID) yield `None`.
    ///
    /// The caller picks the ID; it must not collide with a running request. Generated IDs skip
    /// the ones picked here while they run.
    pub fn send(&self, request: JsonRpcRequest) -> BraynsResult<Option<JsonRpcFuture>> {
        self.shared.send(request)
    }

    /// Return `true` while the request `id` awaits its reply.
    pub fn is_running(&self, id: &JsonRpcId) -> bool {
        self.shared.manager.is_running(id)
    }

    /// IDs of the requests awaiting a reply.
    pub fn running_requests(&self) -> Vec<JsonRpcId> {
        self.shared.manager.running_ids()
    }

    /// Ask the service to cancel request `id`.
    pub async fn cancel(&self, id: &JsonRpcId) -> BraynsResult<()> {
        self.request("cancel", json!({ "id": id })).await.map(|_| ())
    }

    /// Close the connection gracefully.
    ///
    /// Pending requests fail with [`BraynsError::ConnectionClosed`].
    pub async fn disconnect(mut self) -> BraynsResult<()> {
        tracing::debug!("disconnecting");
        // The writer may already be gone when the service closed first.
        let _ = self.shared.outgoing.send(Outgoing::Close);
        if tokio::time::timeout(CLOSE_TIMEOUT, &mut self.reader)
            .await
            .is_err()
        {
            tracing::warn!("service did not acknowledge close in time");
        }
        self.shared.manager.fail_all();
        Ok(())
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        self.reader.abort();
        self.writer.abort();
        self.shared.manager.fail_all();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/network/instance.rs"]
mod tests;

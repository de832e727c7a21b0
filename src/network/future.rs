use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::instance::Shared;
use crate::network::manager::{ProgressReceiver, ReplyReceiver};
use crate::network::message::{JsonRpcId, JsonRpcProgress, JsonRpcReply};
use serde_json::{Value, json};
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::oneshot::error::TryRecvError;

/// Handle on a request sent to the service and not answered yet.
///
/// Awaiting the handle (or calling [`JsonRpcFuture::wait_for_reply`]) yields the reply.
/// Progress notifications can be consumed before that with [`JsonRpcFuture::next_progress`].
pub struct JsonRpcFuture {
    id: JsonRpcId,
    reply: ReplyReceiver,
    progress: ProgressReceiver,
    ready: Option<BraynsResult<JsonRpcReply>>,
    taken: bool,
    shared: Arc<Shared>,
}

impl std::fmt::Debug for JsonRpcFuture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRpcFuture")
            .field("id", &self.id)
            .field("ready", &self.ready.is_some())
            .field("taken", &self.taken)
            .finish_non_exhaustive()
    }
}

impl JsonRpcFuture {
    pub(crate) fn new(
        id: JsonRpcId,
        reply: ReplyReceiver,
        progress: ProgressReceiver,
        shared: Arc<Shared>,
    ) -> Self {
        Self {
            id,
            reply,
            progress,
            ready: None,
            taken: false,
            shared,
        }
    }

    /// ID of the underlying request.
    pub fn id(&self) -> &JsonRpcId {
        &self.id
    }

    /// Poll without blocking; `true` once a reply or error has arrived and was not taken yet.
    pub fn is_ready(&mut self) -> bool {
        if self.taken {
            return false;
        }
        if self.ready.is_none() {
            self.ready = match self.reply.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Closed) => Some(Err(BraynsError::ConnectionClosed)),
            };
        }
        self.ready.is_some()
    }

    /// Take the reply if it has arrived, without blocking.
    ///
    /// The reply can be taken once; later calls return `None`.
    pub fn try_reply(&mut self) -> Option<BraynsResult<JsonRpcReply>> {
        if !self.is_ready() {
            return None;
        }
        self.taken = true;
        self.ready.take()
    }

    /// Wait for the next progress notification.
    ///
    /// Returns `None` once the request is done; notifications received before the reply are
    /// still delivered first.
    pub async fn next_progress(&mut self) -> Option<JsonRpcProgress> {
        self.progress.recv().await
    }

    /// Wait for the reply (result and binary).
    ///
    /// Fails with a validation error when [`Self::try_reply`] already took it.
    pub async fn wait_for_reply(mut self) -> BraynsResult<JsonRpcReply> {
        if self.taken {
            return Err(BraynsError::validation(format!(
                "reply of request {} already taken",
                self.id
            )));
        }
        if let Some(ready) = self.ready.take() {
            return ready;
        }
        match (&mut self.reply).await {
            Ok(result) => result,
            Err(_) => Err(BraynsError::ConnectionClosed),
        }
    }

    /// Wait for the reply and keep its JSON result only.
    pub async fn wait_for_result(self) -> BraynsResult<Value> {
        self.wait_for_reply().await.map(|reply| reply.result)
    }

    /// Ask the service to cancel the request.
    ///
    /// The request still completes, usually with an error reply.
    pub async fn cancel(&self) -> BraynsResult<()> {
        self.shared
            .task("cancel", json!({ "id": self.id }), Vec::new())?
            .wait_for_reply()
            .await
            .map(|_| ())
    }
}

impl IntoFuture for JsonRpcFuture {
    type Output = BraynsResult<JsonRpcReply>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait_for_reply())
    }
}

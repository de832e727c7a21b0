use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::message::{
    JsonRpcError, JsonRpcId, JsonRpcMessage, JsonRpcProgress, JsonRpcReply,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

pub(crate) type ReplyReceiver = oneshot::Receiver<BraynsResult<JsonRpcReply>>;
pub(crate) type ProgressReceiver = mpsc::UnboundedReceiver<JsonRpcProgress>;

struct PendingTask {
    reply: oneshot::Sender<BraynsResult<JsonRpcReply>>,
    progress: mpsc::UnboundedSender<JsonRpcProgress>,
}

#[derive(Default)]
struct State {
    tasks: HashMap<JsonRpcId, PendingTask>,
    closed: bool,
}

/// Request correlation table: request ID -> pending reply slot and progress stream.
///
/// Resolving a task drops its progress sender, so the progress stream ends right after the
/// notifications received before the reply.
#[derive(Default)]
pub(crate) struct JsonRpcManager {
    state: Mutex<State>,
}

impl JsonRpcManager {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a task for `id` and return its receiving ends.
    pub(crate) fn add_task(&self, id: JsonRpcId) -> BraynsResult<(ReplyReceiver, ProgressReceiver)> {
        let mut state = self.lock();
        if state.closed {
            return Err(BraynsError::ConnectionClosed);
        }
        if state.tasks.contains_key(&id) {
            return Err(BraynsError::validation(format!(
                "a request with id {id} is already running"
            )));
        }
        let (reply_tx, reply_rx) = oneshot::channel();
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        state.tasks.insert(
            id,
            PendingTask {
                reply: reply_tx,
                progress: progress_tx,
            },
        );
        Ok((reply_rx, progress_rx))
    }

    /// Forget a task without resolving it (e.g. the request could not be sent).
    pub(crate) fn remove_task(&self, id: &JsonRpcId) {
        self.lock().tasks.remove(id);
    }

    pub(crate) fn is_running(&self, id: &JsonRpcId) -> bool {
        self.lock().tasks.contains_key(id)
    }

    pub(crate) fn running_ids(&self) -> Vec<JsonRpcId> {
        self.lock().tasks.keys().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn dispatch(&self, message: JsonRpcMessage) {
        match message {
            JsonRpcMessage::Reply(reply) => self.set_reply(reply),
            JsonRpcMessage::Error(error) => self.set_error(error),
            JsonRpcMessage::Progress(progress) => self.add_progress(progress),
        }
    }

    pub(crate) fn set_reply(&self, reply: JsonRpcReply) {
        let Some(task) = self.lock().tasks.remove(&reply.id) else {
            tracing::warn!(id = %reply.id, "reply for unknown request");
            return;
        };
        // Receiver dropped means nobody waits for this reply anymore.
        let _ = task.reply.send(Ok(reply));
    }

    pub(crate) fn set_error(&self, error: JsonRpcError) {
        let Some(id) = error.id.clone() else {
            tracing::warn!(code = error.code, message = %error.message, "global error from service");
            return;
        };
        let Some(task) = self.lock().tasks.remove(&id) else {
            tracing::warn!(%id, code = error.code, "error for unknown request");
            return;
        };
        let _ = task.reply.send(Err(BraynsError::JsonRpc(error)));
    }

    pub(crate) fn add_progress(&self, progress: JsonRpcProgress) {
        let state = self.lock();
        let Some(task) = state.tasks.get(&progress.id) else {
            tracing::warn!(id = %progress.id, "progress for unknown request");
            return;
        };
        tracing::debug!(id = %progress.id, operation = %progress.operation, amount = progress.amount, "progress");
        let _ = task.progress.send(progress);
    }

    /// Resolve every pending task with [`BraynsError::ConnectionClosed`] and refuse new ones.
    ///
    /// Returns the number of tasks that were still pending.
    pub(crate) fn fail_all(&self) -> usize {
        let tasks = {
            let mut state = self.lock();
            state.closed = true;
            std::mem::take(&mut state.tasks)
        };
        let count = tasks.len();
        for (_, task) in tasks {
            let _ = task.reply.send(Err(BraynsError::ConnectionClosed));
        }
        count
    }
}

#[cfg(test)]
#[path = "../../tests/unit/network/manager.rs"]
mod tests;

//! Scripted in-memory service for unit tests of the typed wrappers.

use crate::network::codec::{Frame, decode_request, encode_message};
use crate::network::instance::Instance;
use crate::network::message::{
    JsonRpcError, JsonRpcMessage, JsonRpcReply, JsonRpcRequest,
};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::Role;

/// What the mock answers to one request.
pub(crate) enum Answer {
    Result(Value),
    Binary(Value, Vec<u8>),
    Error(i64, String),
}

impl From<Value> for Answer {
    fn from(value: Value) -> Self {
        Answer::Result(value)
    }
}

/// Requests received by the mock, in order.
#[derive(Clone, Default)]
pub(crate) struct Log(Arc<Mutex<Vec<JsonRpcRequest>>>);

impl Log {
    pub(crate) fn requests(&self) -> Vec<JsonRpcRequest> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn methods(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.method).collect()
    }

    pub(crate) fn last(&self) -> JsonRpcRequest {
        self.requests().pop().expect("no request received")
    }

    pub(crate) fn last_params(&self) -> Value {
        self.last().params.unwrap_or(Value::Null)
    }
}

/// Connect an [`Instance`] to a mock answering every request with `handler`.
pub(crate) async fn serve<F>(mut handler: F) -> (Instance, Log)
where
    F: FnMut(&JsonRpcRequest) -> Answer + Send + 'static,
{
    let (client, server) = tokio::io::duplex(1 << 20);
    let client = WebSocketStream::from_raw_socket(client, Role::Client, None).await;
    let mut server = WebSocketStream::from_raw_socket(server, Role::Server, None).await;
    let log = Log::default();
    let seen = log.clone();
    tokio::spawn(async move {
        while let Some(Ok(message)) = server.next().await {
            let frame = match message {
                Message::Text(text) => Frame::Text(text),
                Message::Binary(data) => Frame::Binary(data),
                Message::Close(_) => break,
                _ => continue,
            };
            let request = decode_request(&frame).unwrap();
            let answer = handler(&request);
            let id = request.id.clone();
            seen.0.lock().unwrap().push(request);
            let Some(id) = id else {
                continue;
            };
            let reply = match answer {
                Answer::Result(result) => JsonRpcMessage::Reply(JsonRpcReply {
                    id,
                    result,
                    binary: Vec::new(),
                }),
                Answer::Binary(result, binary) => {
                    JsonRpcMessage::Reply(JsonRpcReply { id, result, binary })
                }
                Answer::Error(code, message) => JsonRpcMessage::Error(JsonRpcError {
                    id: Some(id),
                    code,
                    message,
                    data: None,
                }),
            };
            let out = match encode_message(&reply).unwrap() {
                Frame::Text(text) => Message::Text(text),
                Frame::Binary(data) => Message::Binary(data),
            };
            if server.send(out).await.is_err() {
                break;
            }
        }
    });
    (Instance::from_websocket(client), log)
}

/// Mock answering `null` to everything.
pub(crate) async fn serve_null() -> (Instance, Log) {
    serve(|_| Answer::Result(Value::Null)).await
}

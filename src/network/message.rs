//! JSON-RPC 2.0 message types exchanged with the service.
//!
//! Requests may carry a binary payload and replies may return one; see [`crate::network::codec`]
//! for how both travel on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// JSON-RPC request identifier (integer or string).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcId {
    /// Integer ID, as generated by [`crate::Instance`].
    Int(i64),
    /// String ID.
    Str(String),
}

impl fmt::Display for JsonRpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<i64> for JsonRpcId {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for JsonRpcId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for JsonRpcId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Outgoing request.
///
/// A request without `id` is a notification: the service sends no reply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonRpcRequest {
    /// Request ID, `None` for notifications.
    pub id: Option<JsonRpcId>,
    /// Entrypoint name, e.g. `get-version`.
    pub method: String,
    /// Optional params, omitted from the message when `None`.
    pub params: Option<Value>,
    /// Raw payload sent after the JSON text in a binary frame.
    pub binary: Vec<u8>,
}

impl JsonRpcRequest {
    /// Request expecting a reply.
    pub fn new(id: impl Into<JsonRpcId>, method: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            method: method.into(),
            ..Self::default()
        }
    }

    /// Request without reply.
    pub fn notification(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    /// Attach params.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Attach a binary payload.
    pub fn with_binary(mut self, binary: impl Into<Vec<u8>>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Return `true` when no reply is expected.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Successful reply to a request.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonRpcReply {
    /// ID of the request being answered.
    pub id: JsonRpcId,
    /// Result value (`null` when the entrypoint returns nothing).
    pub result: Value,
    /// Binary trailer of the reply frame, empty for text frames.
    pub binary: Vec<u8>,
}

/// Error reply sent by the service.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("JSON-RPC error {code}: {message}")]
pub struct JsonRpcError {
    /// ID of the failed request; `None` when the service could not parse it.
    pub id: Option<JsonRpcId>,
    /// Error code.
    pub code: i64,
    /// Human readable description.
    pub message: String,
    /// Optional structured details (e.g. schema violations).
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Invalid JSON received by the service.
    pub const PARSE_ERROR: i64 = -32700;
    /// Message is not a valid request.
    pub const INVALID_REQUEST: i64 = -32600;
    /// Unknown entrypoint.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Params do not match the entrypoint schema.
    pub const INVALID_PARAMS: i64 = -32602;
    /// Failure inside the service.
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Progress notification for a running request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcProgress {
    /// ID of the running request.
    pub id: JsonRpcId,
    /// Description of the current step.
    pub operation: String,
    /// Completion ratio in `[0, 1]`.
    pub amount: f64,
}

/// Any message the service can send to a client.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonRpcMessage {
    /// Request succeeded.
    Reply(JsonRpcReply),
    /// Request failed (or service-wide error when the ID is missing).
    Error(JsonRpcError),
    /// Request is still running.
    Progress(JsonRpcProgress),
}

use crate::network::message::JsonRpcError;

/// Convenience result type used across the client.
pub type BraynsResult<T> = Result<T, BraynsError>;

/// Top-level error taxonomy used by client APIs.
#[derive(thiserror::Error, Debug)]
pub enum BraynsError {
    /// Invalid user-provided data, detected before anything is sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed or unexpected message received from the service.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Error reply sent by the service for a request.
    #[error(transparent)]
    JsonRpc(#[from] JsonRpcError),

    /// The service could not be reached (nothing listening at the URI).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// WebSocket level failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// The connection closed before the request completed.
    #[error("connection closed")]
    ConnectionClosed,

    /// Client and service do not share the same release.
    #[error("version mismatch: client is {local} but service is {remote}")]
    Version {
        /// Version of this crate.
        local: String,
        /// Version reported by the service.
        remote: String,
    },

    /// Failure while starting or supervising the service process.
    #[error("process error: {0}")]
    Process(String),

    /// Errors when serializing or deserializing typed values.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BraynsError {
    /// Build a [`BraynsError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BraynsError::Protocol`] value.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Build a [`BraynsError::ServiceUnavailable`] value.
    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    /// Build a [`BraynsError::Connection`] value.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Build a [`BraynsError::Process`] value.
    pub fn process(msg: impl Into<String>) -> Self {
        Self::Process(msg.into())
    }

    /// Build a [`BraynsError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return the service error when this is a JSON-RPC error reply.
    pub fn as_json_rpc(&self) -> Option<&JsonRpcError> {
        match self {
            Self::JsonRpc(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for BraynsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

//! JSON-RPC over WebSocket: messages, framing, request tracking and the connection facade.

pub(crate) mod blocking;
pub mod codec;
pub(crate) mod connector;
pub(crate) mod future;
pub(crate) mod instance;
pub(crate) mod manager;
pub mod message;
pub(crate) mod websocket;

use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::codec::{self, Frame};
use crate::network::manager::JsonRpcManager;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// Instruction for the writer task.
#[derive(Debug)]
pub(crate) enum Outgoing {
    Frame(Frame),
    Close,
}

/// Open a client WebSocket to `url` (`ws://` or `wss://`).
pub(crate) async fn open(url: &str) -> BraynsResult<WebSocketStream<MaybeTlsStream<TcpStream>>> {
    match connect_async(url).await {
        Ok((stream, _response)) => Ok(stream),
        Err(tungstenite::Error::Io(e)) if e.kind() == std::io::ErrorKind::ConnectionRefused => {
            Err(BraynsError::service_unavailable(format!("{url}: {e}")))
        }
        Err(e) => Err(BraynsError::connection(format!("open {url}: {e}"))),
    }
}

/// Spawn the reader and writer tasks driving `stream`.
///
/// The reader feeds `manager`; the writer forwards `outgoing` in order. When either side stops,
/// pending requests fail with [`BraynsError::ConnectionClosed`].
pub(crate) fn spawn<S>(
    stream: WebSocketStream<S>,
    manager: Arc<JsonRpcManager>,
    outgoing: mpsc::UnboundedReceiver<Outgoing>,
) -> (JoinHandle<()>, JoinHandle<()>)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (sink, stream) = stream.split();
    let reader = tokio::spawn(read_loop(stream, Arc::clone(&manager)));
    let writer = tokio::spawn(write_loop(sink, manager, outgoing));
    (reader, writer)
}

async fn read_loop<St>(mut stream: St, manager: Arc<JsonRpcManager>)
where
    St: futures::Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(message) = stream.next().await {
        let frame = match message {
            Ok(Message::Text(text)) => Frame::Text(text),
            Ok(Message::Binary(data)) => Frame::Binary(data),
            Ok(Message::Close(reason)) => {
                tracing::debug!(?reason, "service closed the connection");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "websocket receive failed");
                break;
            }
        };
        match codec::decode_message(&frame) {
            Ok(message) => {
                tracing::trace!(?message, "received");
                manager.dispatch(message);
            }
            Err(e) => tracing::warn!(error = %e, "dropping invalid message"),
        }
    }
    close_pending(&manager);
}

async fn write_loop<Si>(
    mut sink: Si,
    manager: Arc<JsonRpcManager>,
    mut outgoing: mpsc::UnboundedReceiver<Outgoing>,
) where
    Si: futures::Sink<Message, Error = tungstenite::Error> + Unpin,
{
    while let Some(out) = outgoing.recv().await {
        let message = match out {
            Outgoing::Frame(Frame::Text(text)) => Message::Text(text),
            Outgoing::Frame(Frame::Binary(data)) => Message::Binary(data),
            Outgoing::Close => {
                if let Err(e) = sink.send(Message::Close(None)).await {
                    tracing::debug!(error = %e, "close frame not sent");
                }
                return;
            }
        };
        if let Err(e) = sink.send(message).await {
            tracing::warn!(error = %e, "websocket send failed");
            close_pending(&manager);
            return;
        }
    }
}

fn close_pending(manager: &JsonRpcManager) {
    let pending = manager.fail_all();
    if pending > 0 {
        tracing::warn!(pending, "connection closed with requests still running");
    }
}

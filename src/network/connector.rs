use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::instance::Instance;
use crate::network::websocket;
use std::time::Duration;

/// Connection settings for [`Connector::connect`].
#[derive(Clone, Debug)]
pub struct Connector {
    /// Service address as `host:port`; a full `ws://` / `wss://` URL is also accepted.
    pub uri: String,
    /// Use `wss://` (requires the `tls` feature).
    pub secure: bool,
    /// Connection attempts while the service is unavailable; `None` retries forever.
    pub max_attempts: Option<u32>,
    /// Delay between two attempts.
    pub attempt_period: Duration,
}

impl Default for Connector {
    fn default() -> Self {
        Self {
            uri: "localhost:5000".to_owned(),
            secure: false,
            max_attempts: Some(1),
            attempt_period: Duration::from_millis(100),
        }
    }
}

impl Connector {
    /// Settings for `uri` with defaults for everything else.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// WebSocket URL derived from `uri` and `secure`.
    pub fn url(&self) -> String {
        if self.uri.contains("://") {
            return self.uri.clone();
        }
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{scheme}://{}", self.uri)
    }

    /// Open a connection, retrying while the service is unavailable.
    #[tracing::instrument(skip(self), fields(url = %self.url()))]
    pub async fn connect(&self) -> BraynsResult<Instance> {
        if self.max_attempts == Some(0) {
            return Err(BraynsError::validation("max_attempts must be at least 1"));
        }
        let url = self.url();
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match websocket::open(&url).await {
                Ok(stream) => {
                    tracing::info!(attempt, "connected");
                    return Ok(Instance::from_websocket(stream));
                }
                Err(BraynsError::ServiceUnavailable(reason))
                    if self.max_attempts.is_none_or(|max| attempt < max) =>
                {
                    tracing::debug!(attempt, %reason, "service unavailable, retrying");
                    tokio::time::sleep(self.attempt_period).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/network/connector.rs"]
mod tests;

//! Synchronous facade over [`Instance`].
//!
//! [`BlockingInstance`] owns a tokio runtime so that callers without one (scripts, the CLI) can
//! drive the async client. Any typed wrapper can be run through [`BlockingInstance::block_on`]:
//!
//! ```no_run
//! # fn main() -> brayns::BraynsResult<()> {
//! let client = brayns::BlockingInstance::connect(&brayns::Connector::default())?;
//! let version = client.block_on(brayns::get_version(client.instance()))?;
//! println!("{}", version.tag());
//! # Ok(())
//! # }
//! ```
//!
//! Do not create or drop a [`BlockingInstance`] from inside an async context.

use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::connector::Connector;
use crate::network::future::JsonRpcFuture;
use crate::network::instance::Instance;
use crate::network::message::{JsonRpcId, JsonRpcReply};
use serde_json::Value;
use std::future::Future;
use tokio::runtime::Runtime;

/// Blocking connection to a service.
pub struct BlockingInstance {
    instance: Instance,
    runtime: Runtime,
}

impl BlockingInstance {
    /// Connect with `connector`, blocking until connected or failed.
    pub fn connect(connector: &Connector) -> BraynsResult<Self> {
        let runtime = Runtime::new()
            .map_err(|e| BraynsError::connection(format!("failed to create tokio runtime: {e}")))?;
        let instance = runtime.block_on(connector.connect())?;
        Ok(Self { instance, runtime })
    }

    /// Async instance, to pass to typed wrappers run with [`Self::block_on`].
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Run `future` to completion on the owned runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Blocking [`Instance::request`].
    pub fn request(&self, method: &str, params: Value) -> BraynsResult<Value> {
        self.block_on(self.instance.request(method, params))
    }

    /// Blocking [`Instance::execute`].
    pub fn execute(&self, method: &str, params: Value, binary: Vec<u8>) -> BraynsResult<JsonRpcReply> {
        self.block_on(self.instance.execute(method, params, binary))
    }

    /// Non-blocking [`Instance::task`]; follow it with [`Self::wait`] or poll it.
    pub fn task(&self, method: &str, params: Value, binary: Vec<u8>) -> BraynsResult<JsonRpcFuture> {
        self.instance.task(method, params, binary)
    }

    /// Block until `future` has its reply.
    pub fn wait(&self, future: JsonRpcFuture) -> BraynsResult<JsonRpcReply> {
        self.block_on(future.wait_for_reply())
    }

    /// Blocking [`Instance::cancel`].
    pub fn cancel(&self, id: &JsonRpcId) -> BraynsResult<()> {
        self.block_on(self.instance.cancel(id))
    }

    /// Close the connection gracefully.
    pub fn disconnect(self) -> BraynsResult<()> {
        let Self { instance, runtime } = self;
        runtime.block_on(instance.disconnect())
    }
}

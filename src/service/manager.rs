use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::connector::Connector;
use crate::network::instance::Instance;
use crate::service::Service;
use crate::service::process::Process;

/// Service process together with a connection to it.
#[derive(Debug)]
pub struct Manager {
    process: Process,
    instance: Instance,
}

impl Manager {
    /// Connection to the service.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Service process.
    pub fn process(&mut self) -> &mut Process {
        &mut self.process
    }

    /// Disconnect, then stop the process.
    pub async fn stop(self) -> BraynsResult<()> {
        let Self {
            mut process,
            instance,
        } = self;
        instance.disconnect().await?;
        unblock(move || process.stop()).await
    }
}

/// Run blocking process handling on the blocking pool instead of the async worker.
async fn unblock<T, F>(f: F) -> BraynsResult<T>
where
    F: FnOnce() -> BraynsResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BraynsError::process(format!("service process task failed: {e}")))?
}

/// Start `service` and connect to it with `connector`.
///
/// Connection attempts follow `connector`; they stop early when the process exits, in which case
/// the error carries the last lines the service printed.
#[tracing::instrument(skip_all, fields(uri = %connector.uri))]
pub async fn start(service: &Service, connector: &Connector) -> BraynsResult<Manager> {
    if connector.max_attempts == Some(0) {
        return Err(BraynsError::validation("max_attempts must be at least 1"));
    }
    let mut process = service.start()?;
    let once = Connector {
        max_attempts: Some(1),
        ..connector.clone()
    };
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        if !process.is_running() {
            let logs = unblock(move || {
                process.wait()?;
                Ok(process.logs())
            })
            .await?;
            return Err(BraynsError::process(format!(
                "service exited before accepting connections:\n{}",
                logs.join("\n")
            )));
        }
        match once.connect().await {
            Ok(instance) => return Ok(Manager { process, instance }),
            Err(BraynsError::ServiceUnavailable(reason))
                if connector.max_attempts.is_none_or(|max| attempt < max) =>
            {
                tracing::debug!(attempt, %reason, "waiting for service");
                tokio::time::sleep(connector.attempt_period).await;
            }
            Err(e) => {
                if let Err(stop) = unblock(move || process.stop()).await {
                    tracing::warn!(error = %stop, "failed to stop service process");
                }
                return Err(e);
            }
        }
    }
}

use crate::foundation::error::{BraynsError, BraynsResult};
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};
use std::process::{Child, ExitStatus};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

const LOG_TAIL: usize = 200;
// Output pipes inherited by a grandchild stay open after the service exits.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

type LogTail = Arc<Mutex<VecDeque<String>>>;

/// Running service process started by [`crate::Service::start`].
///
/// The process is killed when this handle is dropped.
pub struct Process {
    child: Child,
    logs: LogTail,
    drains: Vec<JoinHandle<()>>,
    exited: Option<ExitStatus>,
}

impl std::fmt::Debug for Process {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Process")
            .field("pid", &self.child.id())
            .field("exited", &self.exited)
            .finish_non_exhaustive()
    }
}

impl Process {
    pub(crate) fn new(mut child: Child) -> BraynsResult<Self> {
        let logs: LogTail = Arc::new(Mutex::new(VecDeque::with_capacity(LOG_TAIL)));
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BraynsError::process("failed to open service stdout (unexpected)"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| BraynsError::process("failed to open service stderr (unexpected)"))?;
        let drains = vec![
            drain("stdout", stdout, Arc::clone(&logs)),
            drain("stderr", stderr, Arc::clone(&logs)),
        ];
        Ok(Self {
            child,
            logs,
            drains,
            exited: None,
        })
    }

    /// OS process ID.
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Return `true` until the process exits.
    pub fn is_running(&mut self) -> bool {
        if self.exited.is_some() {
            return false;
        }
        match self.child.try_wait() {
            Ok(Some(status)) => {
                self.exited = Some(status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to poll service process");
                false
            }
        }
    }

    /// Most recent output lines (stdout and stderr interleaved).
    pub fn logs(&self) -> Vec<String> {
        match self.logs.lock() {
            Ok(logs) => logs.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Block until the process exits.
    ///
    /// Output is drained on return, unless processes spawned by the service keep it open longer
    /// than a short grace period.
    pub fn wait(&mut self) -> BraynsResult<ExitStatus> {
        let status = match self.exited {
            Some(status) => status,
            None => self.child.wait().map_err(|e| {
                BraynsError::process(format!("failed to wait for service process: {e}"))
            })?,
        };
        self.exited = Some(status);
        self.join_drains();
        Ok(status)
    }

    /// Kill the process and reap it.
    #[tracing::instrument(skip(self), fields(pid = self.child.id()))]
    pub fn stop(&mut self) -> BraynsResult<()> {
        if self.is_running() {
            self.child
                .kill()
                .map_err(|e| BraynsError::process(format!("failed to kill service process: {e}")))?;
        }
        let status = self.wait()?;
        tracing::info!(%status, "service stopped");
        Ok(())
    }

    fn join_drains(&mut self) {
        let deadline = Instant::now() + DRAIN_TIMEOUT;
        while self.drains.iter().any(|h| !h.is_finished()) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        for handle in self.drains.drain(..) {
            if !handle.is_finished() {
                tracing::warn!("service output still open after exit, detaching its reader");
                continue;
            }
            if handle.join().is_err() {
                tracing::warn!("service output drain thread panicked");
            }
        }
    }
}

impl Drop for Process {
    fn drop(&mut self) {
        if self.exited.is_some() {
            return;
        }
        if let Err(e) = self.stop() {
            tracing::warn!(error = %e, "failed to stop service process");
        }
    }
}

fn drain<R: Read + Send + 'static>(stream: &'static str, pipe: R, logs: LogTail) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for line in BufReader::new(pipe).lines() {
            let Ok(line) = line else {
                break;
            };
            tracing::info!(target: "brayns::service", stream, "{line}");
            let mut logs = match logs.lock() {
                Ok(logs) => logs,
                Err(poisoned) => poisoned.into_inner(),
            };
            if logs.len() == LOG_TAIL {
                logs.pop_front();
            }
            logs.push_back(line);
        }
    })
}

#[cfg(all(test, unix))]
#[path = "../../tests/unit/service/process.rs"]
mod tests;

//! Launching the native rendering service as a local subprocess.

pub(crate) mod manager;
pub(crate) mod process;

pub use manager::{Manager, start};
pub use process::Process;

use crate::foundation::error::{BraynsError, BraynsResult};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Verbosity of the service logs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything.
    Trace,
    /// Debug and above.
    Debug,
    /// Info and above.
    Info,
    /// Warnings and above.
    #[default]
    Warn,
    /// Errors and above.
    Error,
    /// Critical errors only.
    Critical,
    /// No logs.
    Off,
}

impl LogLevel {
    /// Name expected by `--log-level`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Off => "off",
        }
    }
}

/// Optional service plugins loaded with `--plugin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Plugin {
    /// Circuit, morphology and simulation loading.
    CircuitExplorer,
    /// Brain atlas volumes.
    AtlasExplorer,
    /// Cylindric (panoramic) camera.
    CylindricCamera,
    /// Protein and molecule loading.
    MoleculeExplorer,
    /// Diffusion tensor imaging streamlines.
    Dti,
}

impl Plugin {
    /// Library name of the plugin.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CircuitExplorer => "braynsCircuitExplorer",
            Self::AtlasExplorer => "braynsAtlasExplorer",
            Self::CylindricCamera => "braynsCylindricCamera",
            Self::MoleculeExplorer => "braynsMoleculeExplorer",
            Self::Dti => "braynsDti",
        }
    }

    /// Every plugin shipped with the service.
    pub fn all() -> Vec<Plugin> {
        vec![
            Self::CircuitExplorer,
            Self::AtlasExplorer,
            Self::CylindricCamera,
            Self::MoleculeExplorer,
            Self::Dti,
        ]
    }
}

/// TLS material for a service accepting `wss://` connections.
#[derive(Clone, Debug, Default)]
pub struct SslServerContext {
    /// PEM private key.
    pub private_key_file: Option<PathBuf>,
    /// Passphrase of the private key.
    pub private_key_passphrase: Option<String>,
    /// PEM certificate.
    pub certificate_file: Option<PathBuf>,
    /// CA file or directory used to verify peers.
    pub ca_location: Option<PathBuf>,
}

/// Options for starting the service executable.
#[derive(Clone, Debug)]
pub struct Service {
    /// Executable name or path.
    pub executable: PathBuf,
    /// Address the service listens on (`host:port`).
    pub uri: String,
    /// Maximum simultaneous clients.
    pub max_clients: u32,
    /// Verbosity of the service logs.
    pub log_level: LogLevel,
    /// Plugins to load.
    pub plugins: Vec<Plugin>,
    /// Enable `wss://` with this TLS material.
    pub ssl: Option<SslServerContext>,
    /// Extra environment variables for the process.
    pub env: BTreeMap<String, String>,
}

impl Default for Service {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("braynsService"),
            uri: "localhost:5000".to_owned(),
            max_clients: 1,
            log_level: LogLevel::default(),
            plugins: Plugin::all(),
            ssl: None,
            env: BTreeMap::new(),
        }
    }
}

impl Service {
    /// Options for a service listening on `uri`.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Full command line, executable first.
    pub fn command_line(&self) -> Vec<String> {
        let mut args = vec![
            self.executable.to_string_lossy().into_owned(),
            "--uri".to_owned(),
            self.uri.clone(),
            "--log-level".to_owned(),
            self.log_level.as_str().to_owned(),
            "--max-clients".to_owned(),
            self.max_clients.to_string(),
        ];
        for plugin in &self.plugins {
            args.push("--plugin".to_owned());
            args.push(plugin.as_str().to_owned());
        }
        if let Some(ssl) = &self.ssl {
            args.push("--secure".to_owned());
            args.push("true".to_owned());
            let paths = [
                ("--private-key-file", &ssl.private_key_file),
                ("--certificate-file", &ssl.certificate_file),
                ("--ca-location", &ssl.ca_location),
            ];
            for (flag, path) in paths {
                if let Some(path) = path {
                    args.push(flag.to_owned());
                    args.push(path.to_string_lossy().into_owned());
                }
            }
            if let Some(passphrase) = &ssl.private_key_passphrase {
                args.push("--private-key-passphrase".to_owned());
                args.push(passphrase.clone());
            }
        }
        args
    }

    /// Spawn the service process.
    #[tracing::instrument(skip(self), fields(executable = %self.executable.display(), uri = %self.uri))]
    pub fn start(&self) -> BraynsResult<Process> {
        if self.max_clients == 0 {
            return Err(BraynsError::validation("max_clients must be at least 1"));
        }
        let args = self.command_line();
        let mut cmd = Command::new(&self.executable);
        cmd.args(&args[1..])
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let child = cmd.spawn().map_err(|e| {
            BraynsError::process(format!(
                "failed to spawn '{}' (is it installed and on PATH?): {e}",
                self.executable.display()
            ))
        })?;
        tracing::info!(pid = child.id(), "service started");
        Process::new(child)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/service.rs"]
mod tests;

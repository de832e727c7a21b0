//! Service version and compatibility check.

use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::instance::Instance;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Release of the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Major.
    pub major: u32,
    /// Minor.
    pub minor: u32,
    /// Patch.
    pub patch: u32,
    /// Source revision (commit hash).
    #[serde(default)]
    pub revision: String,
}

impl Version {
    /// `major.minor.patch`.
    pub fn tag(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Version of the service.
pub async fn get_version(instance: &Instance) -> BraynsResult<Version> {
    instance.request_as("get-version", &Value::Null).await
}

/// Fail with [`BraynsError::Version`] unless the service runs the same release as this crate.
pub async fn check_version(instance: &Instance) -> BraynsResult<Version> {
    let version = get_version(instance).await?;
    ensure_compatible(&version, env!("CARGO_PKG_VERSION"))?;
    Ok(version)
}

fn ensure_compatible(version: &Version, local: &str) -> BraynsResult<()> {
    let local = local.split(['-', '+']).next().unwrap_or(local);
    let remote = version.tag();
    if remote != local {
        return Err(BraynsError::Version {
            local: local.to_owned(),
            remote,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/application/version.rs"]
mod tests;

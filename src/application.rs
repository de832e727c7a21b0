//! Application-wide parameters.

use crate::foundation::core::Resolution;
use crate::foundation::error::BraynsResult;
use crate::network::instance::Instance;
use crate::render::check_jpeg_quality;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Application parameters of the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Loaded plugins.
    #[serde(default)]
    pub plugins: Vec<String>,
    /// Resolution of the interactive framebuffer.
    #[serde(rename = "viewport")]
    pub resolution: Resolution,
    /// JPEG quality of streamed images.
    pub jpeg_quality: u8,
}

/// Current application parameters.
pub async fn get_application(instance: &Instance) -> BraynsResult<Application> {
    instance
        .request_as("get-application-parameters", &Value::Null)
        .await
}

/// Update resolution and/or JPEG quality; `None` keeps the current value.
pub async fn update_application(
    instance: &Instance,
    resolution: Option<Resolution>,
    jpeg_quality: Option<u8>,
) -> BraynsResult<()> {
    let mut params = Map::new();
    if let Some(resolution) = resolution {
        params.insert("viewport".to_owned(), json!(resolution));
    }
    if let Some(quality) = jpeg_quality {
        check_jpeg_quality(quality)?;
        params.insert("jpeg_quality".to_owned(), json!(quality));
    }
    if params.is_empty() {
        return Ok(());
    }
    instance
        .request("set-application-parameters", Value::Object(params))
        .await
        .map(|_| ())
}

/// Ask the service to shut down.
pub async fn stop(instance: &Instance) -> BraynsResult<()> {
    instance.request("quit", Value::Null).await.map(|_| ())
}

#[cfg(test)]
#[path = "../tests/unit/application/application.rs"]
mod tests;

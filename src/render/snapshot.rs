use crate::camera::View;
use crate::foundation::core::{ImageFormat, Resolution};
use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::future::JsonRpcFuture;
use crate::network::instance::Instance;
use crate::render::{NamedParams, image_settings, write_file};
use serde_json::{Map, Value, json};
use std::path::Path;

/// One-shot render that does not touch the interactive camera or renderer.
///
/// Every `None` field falls back to the current state of the service.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Image size.
    pub resolution: Option<Resolution>,
    /// Simulation frame.
    pub frame: Option<u32>,
    /// Camera view.
    pub view: Option<View>,
    /// Camera projection.
    pub camera: Option<NamedParams>,
    /// Renderer.
    pub renderer: Option<NamedParams>,
    /// JPEG quality in `[0, 100]`.
    pub jpeg_quality: u8,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            resolution: None,
            frame: None,
            view: None,
            camera: None,
            renderer: None,
            jpeg_quality: 100,
        }
    }
}

impl Snapshot {
    /// Start rendering and return a handle reporting progress; the image comes as reply binary.
    pub fn task(&self, instance: &Instance, format: ImageFormat) -> BraynsResult<JsonRpcFuture> {
        let params = self.params(format, None)?;
        instance.task("snapshot", params, Vec::new())
    }

    /// Render and return the encoded image.
    #[tracing::instrument(level = "debug", skip(self, instance))]
    pub async fn download(&self, instance: &Instance, format: ImageFormat) -> BraynsResult<Vec<u8>> {
        let reply = self.task(instance, format)?.wait_for_reply().await?;
        if reply.binary.is_empty() {
            return Err(BraynsError::protocol("snapshot reply carries no image"));
        }
        Ok(reply.binary)
    }

    /// Render and write the image to a local `path`; the format follows the extension.
    pub async fn save(&self, instance: &Instance, path: impl AsRef<Path>) -> BraynsResult<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        let data = self.download(instance, format).await?;
        write_file(path, &data)
    }

    /// Render and let the service write the image to `path` on its own host.
    pub async fn save_remotely(&self, instance: &Instance, path: impl AsRef<Path>) -> BraynsResult<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        let params = self.params(format, Some(path))?;
        instance.request("snapshot", params).await.map(|_| ())
    }

    fn params(&self, format: ImageFormat, path: Option<&Path>) -> BraynsResult<Value> {
        let mut params = Map::new();
        params.insert(
            "image_settings".to_owned(),
            image_settings(format, self.jpeg_quality, self.resolution)?,
        );
        if let Some(view) = &self.view {
            params.insert("camera_view".to_owned(), json!(view));
        }
        if let Some(camera) = &self.camera {
            params.insert("camera".to_owned(), json!(camera));
        }
        if let Some(renderer) = &self.renderer {
            params.insert("renderer".to_owned(), json!(renderer));
        }
        if let Some(frame) = self.frame {
            params.insert("simulation_frame".to_owned(), json!(frame));
        }
        if let Some(path) = path {
            params.insert("file_path".to_owned(), json!(path.to_string_lossy()));
        }
        Ok(Value::Object(params))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/snapshot.rs"]
mod tests;

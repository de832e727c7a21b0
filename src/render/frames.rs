use crate::camera::View;
use crate::foundation::core::{ImageFormat, Resolution};
use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::future::JsonRpcFuture;
use crate::network::instance::Instance;
use crate::render::{NamedParams, image_settings};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::path::Path;

/// Simulation frame to export, with an optional camera view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct KeyFrame {
    /// Simulation frame index.
    #[serde(rename = "frame_index")]
    pub index: u32,
    /// Camera view for this frame; the current view when `None`.
    #[serde(rename = "camera_view", skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
}

impl KeyFrame {
    /// Key frames for `indices`, all with `view`.
    pub fn from_indices(indices: impl IntoIterator<Item = u32>, view: Option<View>) -> Vec<Self> {
        indices
            .into_iter()
            .map(|index| Self { index, view })
            .collect()
    }
}

/// Batch render of key frames written by the service on its own host.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameExporter {
    /// Frames to render.
    pub frames: Vec<KeyFrame>,
    /// Output format.
    pub format: ImageFormat,
    /// Image size; the application resolution when `None`.
    pub resolution: Option<Resolution>,
    /// JPEG quality in `[0, 100]`.
    pub jpeg_quality: u8,
    /// Camera projection.
    pub camera: Option<NamedParams>,
    /// Renderer.
    pub renderer: Option<NamedParams>,
    /// Name files `00000.png`, `00001.png`, ... instead of after the frame index.
    pub sequential_naming: bool,
}

impl Default for FrameExporter {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            format: ImageFormat::Png,
            resolution: None,
            jpeg_quality: 100,
            camera: None,
            renderer: None,
            sequential_naming: true,
        }
    }
}

impl FrameExporter {
    /// Exporter for `frames` with defaults for everything else.
    pub fn new(frames: Vec<KeyFrame>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    /// Start exporting into `folder` and return a handle reporting progress.
    pub fn task(&self, instance: &Instance, folder: impl AsRef<Path>) -> BraynsResult<JsonRpcFuture> {
        let params = self.params(folder.as_ref())?;
        instance.task("export-frames", params, Vec::new())
    }

    /// Export every frame into `folder` and wait for completion.
    #[tracing::instrument(skip_all, fields(frames = self.frames.len()))]
    pub async fn export_frames(&self, instance: &Instance, folder: impl AsRef<Path>) -> BraynsResult<()> {
        self.task(instance, folder)?
            .wait_for_reply()
            .await
            .map(|_| ())
    }

    fn params(&self, folder: &Path) -> BraynsResult<Value> {
        if self.frames.is_empty() {
            return Err(BraynsError::validation("no frames to export"));
        }
        let mut params = Map::new();
        params.insert("path".to_owned(), json!(folder.to_string_lossy()));
        params.insert("key_frames".to_owned(), json!(self.frames));
        params.insert(
            "image_settings".to_owned(),
            image_settings(self.format, self.jpeg_quality, self.resolution)?,
        );
        if let Some(camera) = &self.camera {
            params.insert("camera".to_owned(), json!(camera));
        }
        if let Some(renderer) = &self.renderer {
            params.insert("renderer".to_owned(), json!(renderer));
        }
        params.insert("sequential_naming".to_owned(), json!(self.sequential_naming));
        Ok(Value::Object(params))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frames.rs"]
mod tests;

use crate::foundation::core::ImageFormat;
use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::instance::Instance;
use crate::render::{check_jpeg_quality, write_file};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

/// Render a frame with the current camera, renderer and application settings.
///
/// Unlike [`crate::Snapshot`], rendering accumulates over successive calls while nothing changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Image {
    /// Render until the accumulation is full.
    pub accumulate: bool,
    /// Transfer the image even if it did not change since the last call.
    pub force_download: bool,
    /// JPEG quality in `[0, 100]`.
    pub jpeg_quality: u8,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            accumulate: false,
            force_download: false,
            jpeg_quality: 100,
        }
    }
}

/// Accumulation state after [`Image`] calls, with the image if it was transferred.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ImageInfo {
    /// Frames accumulated so far.
    pub accumulation: u32,
    /// Frames needed for a converged image.
    pub max_accumulation: u32,
    /// Encoded image; empty when not transferred.
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl ImageInfo {
    /// Return `true` once the image has converged.
    pub fn is_full(&self) -> bool {
        self.accumulation >= self.max_accumulation
    }
}

impl Image {
    /// Render without transferring the image.
    pub async fn render(&self, instance: &Instance) -> BraynsResult<ImageInfo> {
        self.run(instance, ImageFormat::default(), false).await
    }

    /// Render and transfer the image in `format`.
    pub async fn download(&self, instance: &Instance, format: ImageFormat) -> BraynsResult<ImageInfo> {
        self.run(instance, format, true).await
    }

    /// Render and write the image to a local `path` if it was transferred.
    pub async fn save(&self, instance: &Instance, path: impl AsRef<Path>) -> BraynsResult<ImageInfo> {
        let path = path.as_ref();
        let info = self.download(instance, ImageFormat::from_path(path)?).await?;
        if !info.data.is_empty() {
            write_file(path, &info.data)?;
        }
        Ok(info)
    }

    async fn run(&self, instance: &Instance, format: ImageFormat, send: bool) -> BraynsResult<ImageInfo> {
        check_jpeg_quality(self.jpeg_quality)?;
        let params = json!({
            "send": send,
            "force": self.force_download,
            "accumulate": self.accumulate,
            "format": format,
            "jpeg_quality": self.jpeg_quality,
        });
        let reply = instance.execute("render-image", params, Vec::new()).await?;
        let mut info: ImageInfo = serde_json::from_value(reply.result)
            .map_err(|e| BraynsError::serde(format!("decode result of render-image: {e}")))?;
        info.data = reply.binary;
        Ok(info)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/image.rs"]
mod tests;

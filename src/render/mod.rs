//! Renderers and image production.

pub(crate) mod frames;
pub(crate) mod image;
pub(crate) mod snapshot;

pub use frames::{FrameExporter, KeyFrame};
pub use image::{Image, ImageInfo};
pub use snapshot::Snapshot;

use crate::camera::projection::Projection;
use crate::foundation::color::Color4;
use crate::foundation::core::{ImageFormat, Resolution};
use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::instance::Instance;
use anyhow::Context as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::path::Path;

/// Renderer known by the service under [`Renderer::NAME`].
pub trait Renderer: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Wire name (`get-renderer-<name>`, `set-renderer-<name>`).
    const NAME: &'static str;
}

/// Fast renderer for interactive use.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractiveRenderer {
    /// Samples per pixel and frame.
    pub samples_per_pixel: u32,
    /// Maximum ray depth.
    pub max_ray_bounces: u32,
    /// Background color.
    pub background_color: Color4,
    /// Cast shadows.
    pub enable_shadows: bool,
    /// Ambient occlusion samples; zero disables it.
    pub ambient_occlusion_samples: u32,
}

impl Default for InteractiveRenderer {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            max_ray_bounces: 3,
            background_color: Color4::BLACK,
            enable_shadows: true,
            ambient_occlusion_samples: 0,
        }
    }
}

impl Renderer for InteractiveRenderer {
    const NAME: &'static str = "interactive";
}

/// Path tracer for final images.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionRenderer {
    /// Samples per pixel and frame.
    pub samples_per_pixel: u32,
    /// Maximum ray depth.
    pub max_ray_bounces: u32,
    /// Background color.
    pub background_color: Color4,
}

impl Default for ProductionRenderer {
    fn default() -> Self {
        Self {
            samples_per_pixel: 128,
            max_ray_bounces: 7,
            background_color: Color4::BLACK,
        }
    }
}

impl Renderer for ProductionRenderer {
    const NAME: &'static str = "production";
}

/// Wire name of the current renderer.
pub async fn get_renderer_name(instance: &Instance) -> BraynsResult<String> {
    instance.request_as("get-renderer-type", &Value::Null).await
}

/// Current renderer, which must be of type `R`.
pub async fn get_renderer<R: Renderer>(instance: &Instance) -> BraynsResult<R> {
    let method = format!("get-renderer-{}", R::NAME);
    instance.request_as(&method, &Value::Null).await
}

/// Replace the renderer (this also switches the renderer type).
pub async fn set_renderer<R: Renderer>(instance: &Instance, renderer: &R) -> BraynsResult<()> {
    let method = format!("set-renderer-{}", R::NAME);
    instance
        .request_as::<_, Value>(&method, renderer)
        .await
        .map(|_| ())
}

/// Camera or renderer override `{"name", "params"}` for one-shot renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedParams {
    /// Wire name of the camera or renderer type.
    pub name: String,
    /// Its parameters.
    pub params: Value,
}

impl NamedParams {
    /// Override with the projection `P`.
    pub fn camera<P: Projection>(projection: &P) -> BraynsResult<Self> {
        Ok(Self {
            name: P::NAME.to_owned(),
            params: serde_json::to_value(projection)?,
        })
    }

    /// Override with the renderer `R`.
    pub fn renderer<R: Renderer>(renderer: &R) -> BraynsResult<Self> {
        Ok(Self {
            name: R::NAME.to_owned(),
            params: serde_json::to_value(renderer)?,
        })
    }
}

pub(crate) fn check_jpeg_quality(quality: u8) -> BraynsResult<()> {
    if quality > 100 {
        return Err(BraynsError::validation(format!(
            "JPEG quality must be in [0, 100], got {quality}"
        )));
    }
    Ok(())
}

pub(crate) fn image_settings(
    format: ImageFormat,
    jpeg_quality: u8,
    resolution: Option<Resolution>,
) -> BraynsResult<Value> {
    check_jpeg_quality(jpeg_quality)?;
    let mut settings = Map::new();
    settings.insert("format".to_owned(), json!(format));
    if format == ImageFormat::Jpeg {
        settings.insert("quality".to_owned(), json!(jpeg_quality));
    }
    if let Some(resolution) = resolution {
        settings.insert("size".to_owned(), json!(resolution));
    }
    Ok(Value::Object(settings))
}

pub(crate) fn write_file(path: &Path, data: &[u8]) -> BraynsResult<()> {
    std::fs::write(path, data).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "image written");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;

//! Models of the scene and the operations on them.

pub(crate) mod color_ramp;
pub(crate) mod loader;
pub(crate) mod scene;

pub use color_ramp::{ColorRamp, ValueRange, get_color_ramp, set_color_ramp};
pub use loader::{
    GenericLoader, Loader, LoaderInfo, MeshLoader, MhdVolumeLoader, RawVolumeLoader,
    VolumeDataType, get_loaders, load, upload,
};
pub use scene::{Scene, get_bounds, get_scene};

use crate::foundation::core::Bounds;
use crate::foundation::error::BraynsResult;
use crate::foundation::transform::Transform;
use crate::network::instance::Instance;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Model (mesh, volume, light, geometry set, ...) loaded in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// ID, unique in the scene.
    pub id: u32,
    /// Model type as reported by the service.
    #[serde(rename = "type")]
    pub model_type: String,
    /// World bounds after transform.
    pub bounds: Bounds,
    /// Loader-specific metadata.
    #[serde(default)]
    pub info: Value,
    /// Whether the model is rendered.
    #[serde(rename = "is_visible", default = "visible")]
    pub visible: bool,
    /// Model transform.
    #[serde(default)]
    pub transform: Transform,
}

fn visible() -> bool {
    true
}

/// Model with ID `id`.
pub async fn get_model(instance: &Instance, id: u32) -> BraynsResult<Model> {
    instance.request_as("get-model", &json!({ "id": id })).await
}

/// Change visibility and/or transform of model `id`; `None` keeps the current value.
#[tracing::instrument(level = "debug", skip(instance, transform))]
pub async fn update_model(
    instance: &Instance,
    id: u32,
    visible: Option<bool>,
    transform: Option<&Transform>,
) -> BraynsResult<Model> {
    let mut model = Map::new();
    if let Some(visible) = visible {
        model.insert("is_visible".to_owned(), json!(visible));
    }
    if let Some(transform) = transform {
        model.insert("transform".to_owned(), serde_json::to_value(transform)?);
    }
    let params = json!({ "model_id": id, "model": model });
    instance.request_as("update-model", &params).await
}

/// Remove the models with the given IDs.
pub async fn remove_models(instance: &Instance, ids: &[u32]) -> BraynsResult<()> {
    instance
        .request("remove-model", json!({ "ids": ids }))
        .await
        .map(|_| ())
}

/// Remove every model, lights excluded.
pub async fn clear_models(instance: &Instance) -> BraynsResult<()> {
    instance.request("clear-models", Value::Null).await.map(|_| ())
}

/// Create one instance of model `id` per transform, sharing its data.
pub async fn instantiate_model(
    instance: &Instance,
    id: u32,
    transforms: &[Transform],
) -> BraynsResult<Vec<Model>> {
    let params = json!({ "model_id": id, "transforms": transforms });
    instance.request_as("instantiate-model", &params).await
}

#[cfg(test)]
#[path = "../../tests/unit/model/model.rs"]
mod tests;

use crate::foundation::core::Bounds;
use crate::foundation::error::BraynsResult;
use crate::model::Model;
use crate::network::instance::Instance;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content of the scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Bounds of all visible models.
    pub bounds: Bounds,
    /// Every model, lights included.
    #[serde(default)]
    pub models: Vec<Model>,
}

impl Scene {
    /// Model with ID `id`, if any.
    pub fn model(&self, id: u32) -> Option<&Model> {
        self.models.iter().find(|model| model.id == id)
    }
}

/// Current scene.
pub async fn get_scene(instance: &Instance) -> BraynsResult<Scene> {
    instance.request_as("get-scene", &Value::Null).await
}

/// Bounds of the current scene.
pub async fn get_bounds(instance: &Instance) -> BraynsResult<Bounds> {
    get_scene(instance).await.map(|scene| scene.bounds)
}

#[cfg(test)]
#[path = "../../tests/unit/model/scene.rs"]
mod tests;

//! Scene lights.
//!
//! Lights are models of their own: [`add_light`] returns the model created for the light, and
//! removing that model removes the light.

use crate::foundation::color::Color3;
use crate::foundation::core::{Axis, Vector3};
use crate::foundation::error::BraynsResult;
use crate::model::Model;
use crate::network::instance::Instance;
use serde::Serialize;
use serde_json::{Value, json};

/// Light type known by the service under [`Light::NAME`].
pub trait Light: Serialize + Send + Sync {
    /// Wire name (`add-light-<name>`).
    const NAME: &'static str;
}

/// Uniform light coming from every direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AmbientLight {
    /// Light color.
    pub color: Color3,
    /// Light intensity.
    pub intensity: f64,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color3::WHITE,
            intensity: 1.0,
        }
    }
}

impl Light for AmbientLight {
    const NAME: &'static str = "ambient";
}

/// Parallel light, like the sun.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DirectionalLight {
    /// Light color.
    pub color: Color3,
    /// Light intensity.
    pub intensity: f64,
    /// Direction the light travels to.
    pub direction: Vector3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Color3::WHITE,
            intensity: 1.0,
            direction: Axis::BACK,
        }
    }
}

impl Light for DirectionalLight {
    const NAME: &'static str = "directional";
}

/// Parallelogram area light spanned by two edges from a corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuadLight {
    /// Light color.
    pub color: Color3,
    /// Light intensity.
    pub intensity: f64,
    /// Corner of the quad.
    pub bottom_left: Vector3,
    /// First edge from the corner.
    pub edge1: Vector3,
    /// Second edge from the corner.
    pub edge2: Vector3,
}

impl Default for QuadLight {
    fn default() -> Self {
        Self {
            color: Color3::WHITE,
            intensity: 1.0,
            bottom_left: Vector3::ZERO,
            edge1: Axis::RIGHT,
            edge2: Axis::UP,
        }
    }
}

impl QuadLight {
    /// Light emitting direction (normal of the quad).
    pub fn emission_direction(&self) -> Vector3 {
        self.edge1.cross(self.edge2).normalize_or_zero()
    }
}

impl Light for QuadLight {
    const NAME: &'static str = "quad";
}

/// Spherical area light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SphereLight {
    /// Light color.
    pub color: Color3,
    /// Light intensity.
    pub intensity: f64,
    /// Sphere center.
    pub position: Vector3,
    /// Sphere radius.
    pub radius: f64,
}

impl Default for SphereLight {
    fn default() -> Self {
        Self {
            color: Color3::WHITE,
            intensity: 1.0,
            position: Vector3::ZERO,
            radius: 0.0,
        }
    }
}

impl Light for SphereLight {
    const NAME: &'static str = "sphere";
}

/// Add `light` to the scene and return its model.
pub async fn add_light<L: Light>(instance: &Instance, light: &L) -> BraynsResult<Model> {
    let method = format!("add-light-{}", L::NAME);
    instance.request_as(&method, light).await
}

/// Remove the lights (or any models) with the given IDs.
pub async fn remove_lights(instance: &Instance, ids: &[u32]) -> BraynsResult<()> {
    instance
        .request("remove-model", json!({ "ids": ids }))
        .await
        .map(|_| ())
}

/// Remove every light.
pub async fn clear_lights(instance: &Instance) -> BraynsResult<()> {
    instance.request("clear-lights", Value::Null).await.map(|_| ())
}

#[cfg(test)]
#[path = "../tests/unit/light/light.rs"]
mod tests;

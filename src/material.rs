//! Model materials.

use crate::foundation::color::Color3;
use crate::foundation::error::BraynsResult;
use crate::network::instance::Instance;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Material type known by the service under [`Material::NAME`].
pub trait Material: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Wire name (`get-material-<name>`, `set-material-<name>`).
    const NAME: &'static str;
}

/// Renderer default shading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultMaterial {}

impl Material for DefaultMaterial {
    const NAME: &'static str = "default";
}

/// Phong shading with transparency.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhongMaterial {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self { opacity: 1.0 }
    }
}

impl Material for PhongMaterial {
    const NAME: &'static str = "phong";
}

/// Metal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetalMaterial {
    /// Surface roughness in `[0, 1]`.
    pub roughness: f64,
}

impl Material for MetalMaterial {
    const NAME: &'static str = "metal";
}

/// Glossy plastic.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlasticMaterial {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for PlasticMaterial {
    fn default() -> Self {
        Self { opacity: 1.0 }
    }
}

impl Material for PlasticMaterial {
    const NAME: &'static str = "plastic";
}

/// Refractive glass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlassMaterial {
    /// Index of refraction.
    pub index_of_refraction: f64,
}

impl Default for GlassMaterial {
    fn default() -> Self {
        Self {
            index_of_refraction: 1.5,
        }
    }
}

impl Material for GlassMaterial {
    const NAME: &'static str = "glass";
}

/// Light-emitting surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissiveMaterial {
    /// Emitted color.
    pub color: Color3,
    /// Emission intensity.
    pub intensity: f64,
}

impl Default for EmissiveMaterial {
    fn default() -> Self {
        Self {
            color: Color3::WHITE,
            intensity: 1.0,
        }
    }
}

impl Material for EmissiveMaterial {
    const NAME: &'static str = "emissive";
}

/// Diffuse-only surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatteMaterial {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for MatteMaterial {
    fn default() -> Self {
        Self { opacity: 1.0 }
    }
}

impl Material for MatteMaterial {
    const NAME: &'static str = "matte";
}

/// Car paint with metallic flakes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarPaintMaterial {
    /// Flake density in `[0, 1]`.
    pub flake_density: f64,
}

impl Material for CarPaintMaterial {
    const NAME: &'static str = "carpaint";
}

/// Translucent surface fading towards the silhouette.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostMaterial {
    /// Fade strength in `[0, 1]`.
    pub strength: f64,
}

impl Default for GhostMaterial {
    fn default() -> Self {
        Self { strength: 1.0 }
    }
}

impl Material for GhostMaterial {
    const NAME: &'static str = "ghost";
}

/// Physically based material.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrincipledMaterial {
    /// Edge tint of metals.
    pub edge_color: Color3,
    /// Metallic blend in `[0, 1]`.
    pub metallic: f64,
    /// Diffuse reflectivity.
    pub diffuse: f64,
    /// Specular reflectivity.
    pub specular: f64,
    /// Index of refraction.
    pub ior: f64,
    /// Specular transmission in `[0, 1]`.
    pub transmission: f64,
    /// Attenuation color of transmitted light.
    pub transmission_color: Color3,
    /// Distance at which transmitted light reaches `transmission_color`.
    pub transmission_depth: f64,
    /// Surface roughness in `[0, 1]`.
    pub roughness: f64,
    /// Specular anisotropy in `[0, 1]`.
    pub anisotropy: f64,
    /// Anisotropy direction rotation in `[0, 1]`.
    pub anisotropy_rotation: f64,
    /// Treat surfaces as infinitely thin.
    pub thin: bool,
    /// Thickness of thin surfaces.
    pub thickness: f64,
    /// Diffuse transmission of thin surfaces in `[0, 2]`.
    pub back_light: f64,
    /// Clear coat weight.
    pub coat: f64,
    /// Clear coat index of refraction.
    pub coat_ior: f64,
    /// Clear coat color.
    pub coat_color: Color3,
    /// Clear coat thickness.
    pub coat_thickness: f64,
    /// Clear coat roughness.
    pub coat_roughness: f64,
    /// Sheen weight.
    pub sheen: f64,
    /// Sheen color.
    pub sheen_color: Color3,
    /// Sheen tint towards the base color.
    pub sheen_tint: f64,
    /// Sheen roughness.
    pub sheen_roughness: f64,
}

impl Default for PrincipledMaterial {
    fn default() -> Self {
        Self {
            edge_color: Color3::WHITE,
            metallic: 0.0,
            diffuse: 1.0,
            specular: 1.0,
            ior: 1.0,
            transmission: 0.0,
            transmission_color: Color3::WHITE,
            transmission_depth: 1.0,
            roughness: 0.0,
            anisotropy: 0.0,
            anisotropy_rotation: 0.0,
            thin: false,
            thickness: 1.0,
            back_light: 0.0,
            coat: 0.0,
            coat_ior: 1.5,
            coat_color: Color3::WHITE,
            coat_thickness: 1.0,
            coat_roughness: 0.0,
            sheen: 0.0,
            sheen_color: Color3::WHITE,
            sheen_tint: 0.0,
            sheen_roughness: 0.2,
        }
    }
}

impl Material for PrincipledMaterial {
    const NAME: &'static str = "principled";
}

/// Wire name of the material of model `model_id`.
pub async fn get_material_name(instance: &Instance, model_id: u32) -> BraynsResult<String> {
    instance
        .request_as("get-material-type", &json!({ "id": model_id }))
        .await
}

/// Material of model `model_id`, which must be of type `M`.
pub async fn get_material<M: Material>(instance: &Instance, model_id: u32) -> BraynsResult<M> {
    let method = format!("get-material-{}", M::NAME);
    instance.request_as(&method, &json!({ "id": model_id })).await
}

/// Replace the material of model `model_id`.
pub async fn set_material<M: Material>(
    instance: &Instance,
    model_id: u32,
    material: &M,
) -> BraynsResult<()> {
    let method = format!("set-material-{}", M::NAME);
    let params = json!({ "model_id": model_id, "material": material });
    instance
        .request_as::<_, Value>(&method, &params)
        .await
        .map(|_| ())
}

#[cfg(test)]
#[path = "../tests/unit/material/material.rs"]
mod tests;

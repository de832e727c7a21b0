//! Primitive geometries added to the scene as models.

use crate::foundation::color::Color4;
use crate::foundation::core::{Bounds, Vector3};
use crate::foundation::error::{BraynsError, BraynsResult};
use crate::model::Model;
use crate::network::instance::Instance;
use serde::Serialize;
use serde_json::{Value, json};

/// Geometry known by the service under [`Geometry::METHOD`].
pub trait Geometry: Serialize + Send + Sync {
    /// Wire suffix (`add-<method>`, `add-clipping-<method>`).
    const METHOD: &'static str;
}

/// Axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoxGeometry {
    /// Lower corner.
    pub min: Vector3,
    /// Upper corner.
    pub max: Vector3,
}

impl From<Bounds> for BoxGeometry {
    fn from(bounds: Bounds) -> Self {
        Self {
            min: bounds.min,
            max: bounds.max,
        }
    }
}

impl Geometry for BoxGeometry {
    const METHOD: &'static str = "boxes";
}

/// Sphere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sphere {
    /// Center.
    pub center: Vector3,
    /// Radius.
    pub radius: f64,
}

impl Geometry for Sphere {
    const METHOD: &'static str = "spheres";
}

/// Cone-like capsule between two spheres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Capsule {
    /// First end.
    pub start_point: Vector3,
    /// Radius at the first end.
    pub start_radius: f64,
    /// Second end.
    pub end_point: Vector3,
    /// Radius at the second end.
    pub end_radius: f64,
}

impl Capsule {
    /// Cylinder-like capsule of constant `radius`.
    pub fn uniform(start_point: Vector3, end_point: Vector3, radius: f64) -> Self {
        Self {
            start_point,
            start_radius: radius,
            end_point,
            end_radius: radius,
        }
    }
}

impl Geometry for Capsule {
    const METHOD: &'static str = "capsules";
}

/// Infinite plane `a*x + b*y + c*z + d = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Plane {
    /// `[a, b, c, d]`.
    pub coefficients: [f64; 4],
}

impl Plane {
    /// Plane through `point` with `normal`.
    pub fn from_normal(normal: Vector3, point: Vector3) -> BraynsResult<Self> {
        let normal = normal.try_normalize().ok_or_else(|| {
            BraynsError::validation("plane normal must be a non-zero vector")
        })?;
        Ok(Self {
            coefficients: [normal.x, normal.y, normal.z, -normal.dot(point)],
        })
    }

    /// Normal `(a, b, c)`.
    pub fn normal(&self) -> Vector3 {
        let [a, b, c, _] = self.coefficients;
        Vector3::new(a, b, c)
    }
}

impl Geometry for Plane {
    const METHOD: &'static str = "planes";
}

/// Plane restricted to a box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundedPlane {
    /// `[a, b, c, d]`.
    pub coefficients: [f64; 4],
    /// Visible part of the plane.
    pub bounds: Bounds,
}

impl Geometry for BoundedPlane {
    const METHOD: &'static str = "bounded-planes";
}

/// Add colored geometries as one new model.
#[tracing::instrument(level = "debug", skip_all, fields(method = G::METHOD, count = items.len()))]
pub async fn add_geometry<G: Geometry>(
    instance: &Instance,
    items: &[(G, Color4)],
) -> BraynsResult<Model> {
    if items.is_empty() {
        return Err(BraynsError::validation("no geometry to add"));
    }
    let params: Vec<Value> = items
        .iter()
        .map(|(geometry, color)| json!({ "geometry": geometry, "color": color }))
        .collect();
    let method = format!("add-{}", G::METHOD);
    instance.request_as(&method, &params).await
}

/// Add geometries clipping the scene; the returned model removes them when removed.
pub async fn add_clipping_geometry<G: Geometry>(
    instance: &Instance,
    items: &[G],
) -> BraynsResult<Model> {
    if items.is_empty() {
        return Err(BraynsError::validation("no clipping geometry to add"));
    }
    let params: Vec<Value> = items
        .iter()
        .map(|geometry| json!({ "geometry": geometry }))
        .collect();
    let method = format!("add-clipping-{}", G::METHOD);
    instance.request_as(&method, &params).await
}

/// Remove every clipping geometry.
pub async fn clear_clipping_geometries(instance: &Instance) -> BraynsResult<()> {
    instance
        .request("clear-clipping-geometries", Value::Null)
        .await
        .map(|_| ())
}

#[cfg(test)]
#[path = "../tests/unit/geometry/geometry.rs"]
mod tests;

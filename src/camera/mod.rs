//! Camera view and projection.

pub(crate) mod projection;

pub use projection::{Fovy, OrthographicProjection, PerspectiveProjection, Projection};

use crate::foundation::core::{Axis, Bounds, Vector3};
use crate::foundation::error::{BraynsError, BraynsResult};
use crate::foundation::rotation::Rotation;
use crate::network::instance::Instance;
use glam::DMat3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the camera is and where it looks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Eye position.
    pub position: Vector3,
    /// Point looked at.
    pub target: Vector3,
    /// Up direction.
    pub up: Vector3,
}

impl Default for View {
    fn default() -> Self {
        Self {
            position: Axis::FRONT,
            target: Vector3::ZERO,
            up: Axis::UP,
        }
    }
}

impl View {
    /// Vector from position to target.
    pub fn vector(&self) -> Vector3 {
        self.target - self.position
    }

    /// Normalized viewing direction (zero if position and target coincide).
    pub fn direction(&self) -> Vector3 {
        self.vector().normalize_or_zero()
    }

    /// Distance from position to target.
    pub fn distance(&self) -> f64 {
        self.vector().length()
    }

    /// Rotation from the default view (looking at `-Z`, `+Y` up) to this one.
    pub fn orientation(&self) -> BraynsResult<Rotation> {
        let forward = self.direction();
        let right = forward.cross(self.up).normalize_or_zero();
        if forward == Vector3::ZERO || right == Vector3::ZERO {
            return Err(BraynsError::validation(
                "view direction is zero or parallel to up",
            ));
        }
        let up = right.cross(forward);
        let basis = DMat3::from_cols(right, up, -forward);
        Rotation::from_quaternion(glam::DQuat::from_mat3(&basis))
    }

    /// Move position and target by `offset`.
    pub fn translate(self, offset: Vector3) -> Self {
        Self {
            position: self.position + offset,
            target: self.target + offset,
            up: self.up,
        }
    }

    /// Orbit the position around the target.
    pub fn rotate_around_target(self, rotation: &Rotation) -> Self {
        Self {
            position: rotation.apply_around(self.position, self.target),
            target: self.target,
            up: rotation.apply(self.up),
        }
    }
}

/// View and projection of the current camera.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Camera<P> {
    /// Camera view.
    pub view: View,
    /// Camera projection.
    pub projection: P,
}

impl<P: Projection> Camera<P> {
    /// Eye position.
    pub fn position(&self) -> Vector3 {
        self.view.position
    }

    /// Point looked at.
    pub fn target(&self) -> Vector3 {
        self.view.target
    }

    /// Normalized viewing direction.
    pub fn direction(&self) -> Vector3 {
        self.view.direction()
    }

    /// Distance from position to target.
    pub fn distance(&self) -> f64 {
        self.view.distance()
    }
}

/// Wire name of the current projection.
pub async fn get_camera_name(instance: &Instance) -> BraynsResult<String> {
    instance.request_as("get-camera-type", &Value::Null).await
}

/// Current camera view.
pub async fn get_camera_view(instance: &Instance) -> BraynsResult<View> {
    instance.request_as("get-camera-view", &Value::Null).await
}

/// Update the camera view.
pub async fn set_camera_view(instance: &Instance, view: &View) -> BraynsResult<()> {
    instance
        .request_as::<_, Value>("set-camera-view", view)
        .await
        .map(|_| ())
}

/// Current projection, which must be of type `P`.
pub async fn get_camera_projection<P: Projection>(instance: &Instance) -> BraynsResult<P> {
    let method = format!("get-camera-{}", P::NAME);
    instance.request_as(&method, &Value::Null).await
}

/// Replace the projection (this also switches the camera type).
pub async fn set_camera_projection<P: Projection>(
    instance: &Instance,
    projection: &P,
) -> BraynsResult<()> {
    let method = format!("set-camera-{}", P::NAME);
    instance
        .request_as::<_, Value>(&method, projection)
        .await
        .map(|_| ())
}

/// Current view and projection.
pub async fn get_camera<P: Projection>(instance: &Instance) -> BraynsResult<Camera<P>> {
    let view = get_camera_view(instance).await?;
    let projection = get_camera_projection(instance).await?;
    Ok(Camera { view, projection })
}

/// Update view and projection.
pub async fn set_camera<P: Projection>(instance: &Instance, camera: &Camera<P>) -> BraynsResult<()> {
    set_camera_view(instance, &camera.view).await?;
    set_camera_projection(instance, &camera.projection).await
}

/// Camera looking at `bounds` from the front (down `-Z`) so that they fit a viewport of
/// `aspect_ratio` (width / height).
pub fn look_at<P: Projection>(
    bounds: &Bounds,
    aspect_ratio: f64,
    mut projection: P,
) -> BraynsResult<Camera<P>> {
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return Err(BraynsError::validation(format!(
            "aspect ratio must be positive, got {aspect_ratio}"
        )));
    }
    let center = bounds.center();
    let height = bounds.height().max(bounds.width() / aspect_ratio);
    let distance = projection.fit(height) + bounds.depth() / 2.0;
    Ok(Camera {
        view: View {
            position: center + Axis::FRONT * distance,
            target: center,
            up: Axis::UP,
        },
        projection,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/camera/camera.rs"]
mod tests;

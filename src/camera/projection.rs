use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Camera projection known by the service under [`Projection::NAME`].
pub trait Projection: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Wire name (`get-camera-<name>`, `set-camera-<name>`).
    const NAME: &'static str;

    /// Adapt to frame an object of `height` and return the camera distance from its center.
    fn fit(&mut self, height: f64) -> f64;
}

/// Vertical field of view, stored in degrees as the service expects.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fovy(f64);

impl Fovy {
    /// Field of view of `degrees`.
    pub const fn degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    /// Field of view of `radians`.
    pub fn radians(radians: f64) -> Self {
        Self(radians.to_degrees())
    }

    /// Value in degrees.
    pub fn to_degrees(self) -> f64 {
        self.0
    }

    /// Value in radians.
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Distance at which an object of `height` fills the field of view.
    pub fn look_at(self, height: f64) -> f64 {
        height / 2.0 / (self.to_radians() / 2.0).tan()
    }
}

impl Default for Fovy {
    fn default() -> Self {
        Self(45.0)
    }
}

/// Pinhole or thin-lens perspective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveProjection {
    /// Vertical field of view.
    pub fovy: Fovy,
    /// Lens aperture; zero disables depth of field.
    pub aperture_radius: f64,
    /// Distance of the focal plane.
    pub focus_distance: f64,
}

impl Projection for PerspectiveProjection {
    const NAME: &'static str = "perspective";

    fn fit(&mut self, height: f64) -> f64 {
        self.fovy.look_at(height)
    }
}

/// Parallel projection of a fixed viewport height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthographicProjection {
    /// Viewport height in world units.
    pub height: f64,
}

impl Default for OrthographicProjection {
    fn default() -> Self {
        Self { height: 1.0 }
    }
}

impl Projection for OrthographicProjection {
    const NAME: &'static str = "orthographic";

    fn fit(&mut self, height: f64) -> f64 {
        self.height = height;
        height
    }
}

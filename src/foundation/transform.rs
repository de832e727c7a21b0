use crate::foundation::core::Vector3;
use crate::foundation::rotation::Rotation;
use serde::{Deserialize, Serialize};

/// Model transform applied as scale, then rotation, then translation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation vector.
    #[serde(default)]
    pub translation: Vector3,
    /// Rotation around the model origin.
    #[serde(default)]
    pub rotation: Rotation,
    /// Per-axis scale factors.
    #[serde(default = "unit_scale")]
    pub scale: Vector3,
}

fn unit_scale() -> Vector3 {
    Vector3::ONE
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub fn identity() -> Self {
        Self {
            translation: Vector3::ZERO,
            rotation: Rotation::identity(),
            scale: Vector3::ONE,
        }
    }

    /// Pure translation.
    pub fn from_translation(translation: Vector3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Pure rotation.
    pub fn from_rotation(rotation: Rotation) -> Self {
        Self {
            rotation,
            ..Self::identity()
        }
    }

    /// Pure scale.
    pub fn from_scale(scale: Vector3) -> Self {
        Self {
            scale,
            ..Self::identity()
        }
    }

    /// Transform a point.
    pub fn apply(&self, point: Vector3) -> Vector3 {
        self.translation + self.rotation.apply(self.scale * point)
    }

    /// Add `offset` to the translation.
    pub fn translate(self, offset: Vector3) -> Self {
        Self {
            translation: self.translation + offset,
            ..self
        }
    }

    /// Rotate the transformed object around `center` (world space).
    pub fn rotate(self, rotation: &Rotation, center: Vector3) -> Self {
        Self {
            translation: rotation.apply_around(self.translation, center),
            rotation: self.rotation.then(rotation),
            scale: self.scale,
        }
    }

    /// Multiply the scale by `factor`.
    pub fn scale_by(self, factor: Vector3) -> Self {
        Self {
            scale: self.scale * factor,
            ..self
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/transform.rs"]
mod tests;

use crate::foundation::core::Vector3;
use crate::foundation::error::{BraynsError, BraynsResult};
use glam::{DQuat, EulerRot};
use serde::{Deserialize, Serialize};

/// 3D rotation stored as a unit quaternion, serialized as `[x, y, z, w]`.
///
/// Euler angles follow the renderer convention: extrinsic rotations around X, then Y, then Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    q: DQuat,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    /// No rotation.
    pub fn identity() -> Self {
        Self { q: DQuat::IDENTITY }
    }

    /// Build from a quaternion; the quaternion is normalized.
    pub fn from_quaternion(q: DQuat) -> BraynsResult<Self> {
        let len = q.length();
        if !len.is_finite() || len == 0.0 {
            return Err(BraynsError::validation(
                "rotation quaternion must be finite and non-zero",
            ));
        }
        Ok(Self { q: q / len })
    }

    /// Build from extrinsic XYZ Euler angles in radians.
    pub fn from_euler(angles: Vector3) -> Self {
        Self {
            q: DQuat::from_euler(EulerRot::ZYX, angles.z, angles.y, angles.x),
        }
    }

    /// Build from extrinsic XYZ Euler angles in degrees.
    pub fn from_euler_degrees(angles: Vector3) -> Self {
        Self::from_euler(Vector3::new(
            angles.x.to_radians(),
            angles.y.to_radians(),
            angles.z.to_radians(),
        ))
    }

    /// Rotation of `angle` radians around `axis` (any non-zero length).
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> BraynsResult<Self> {
        let axis = axis
            .try_normalize()
            .ok_or_else(|| BraynsError::validation("rotation axis must be non-zero"))?;
        Ok(Self {
            q: DQuat::from_axis_angle(axis, angle),
        })
    }

    /// Rotation of `angle` degrees around `axis`.
    pub fn from_axis_angle_degrees(axis: Vector3, angle: f64) -> BraynsResult<Self> {
        Self::from_axis_angle(axis, angle.to_radians())
    }

    /// Shortest rotation bringing direction `from` onto direction `to`.
    pub fn between(from: Vector3, to: Vector3) -> BraynsResult<Self> {
        let (Some(from), Some(to)) = (from.try_normalize(), to.try_normalize()) else {
            return Err(BraynsError::validation(
                "rotation between zero-length vectors is undefined",
            ));
        };
        Ok(Self {
            q: DQuat::from_rotation_arc(from, to),
        })
    }

    /// Underlying unit quaternion.
    pub fn quaternion(&self) -> DQuat {
        self.q
    }

    /// Extrinsic XYZ Euler angles in radians.
    pub fn euler(&self) -> Vector3 {
        let (z, y, x) = self.q.to_euler(EulerRot::ZYX);
        Vector3::new(x, y, z)
    }

    /// Extrinsic XYZ Euler angles in degrees.
    pub fn euler_degrees(&self) -> Vector3 {
        let e = self.euler();
        Vector3::new(e.x.to_degrees(), e.y.to_degrees(), e.z.to_degrees())
    }

    /// Rotation axis (unit X for the identity).
    pub fn axis(&self) -> Vector3 {
        self.q.to_axis_angle().0
    }

    /// Rotation angle in radians, in `[0, 2*pi)`.
    pub fn angle(&self) -> f64 {
        self.q.to_axis_angle().1
    }

    /// Rotation angle in degrees.
    pub fn angle_degrees(&self) -> f64 {
        self.angle().to_degrees()
    }

    /// Rotation applying `self` first and then `other`.
    pub fn then(&self, other: &Rotation) -> Rotation {
        Rotation {
            q: (other.q * self.q).normalize(),
        }
    }

    /// Inverse rotation.
    pub fn inverse(&self) -> Rotation {
        Rotation {
            q: self.q.inverse(),
        }
    }

    /// Rotate `v` around the origin.
    pub fn apply(&self, v: Vector3) -> Vector3 {
        self.q * v
    }

    /// Rotate point `v` around `center`.
    pub fn apply_around(&self, v: Vector3, center: Vector3) -> Vector3 {
        center + self.q * (v - center)
    }
}

impl Serialize for Rotation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.q.x, self.q.y, self.q.z, self.q.w].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let [x, y, z, w] = <[f64; 4]>::deserialize(deserializer)?;
        Self::from_quaternion(DQuat::from_xyzw(x, y, z, w)).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rotation.rs"]
mod tests;

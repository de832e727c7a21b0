use crate::foundation::error::{BraynsError, BraynsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use glam::DVec3 as Vector3;

/// Named unit vectors of the renderer's right-handed frame.
///
/// The default camera looks down `-Z` with `+Y` up.
pub struct Axis;

impl Axis {
    /// Unit X.
    pub const X: Vector3 = Vector3::X;
    /// Unit Y.
    pub const Y: Vector3 = Vector3::Y;
    /// Unit Z.
    pub const Z: Vector3 = Vector3::Z;
    /// `+X`.
    pub const RIGHT: Vector3 = Vector3::X;
    /// `-X`.
    pub const LEFT: Vector3 = Vector3::NEG_X;
    /// `+Y`.
    pub const UP: Vector3 = Vector3::Y;
    /// `-Y`.
    pub const DOWN: Vector3 = Vector3::NEG_Y;
    /// `+Z`, towards a default camera.
    pub const FRONT: Vector3 = Vector3::Z;
    /// `-Z`, away from a default camera.
    pub const BACK: Vector3 = Vector3::NEG_Z;
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower corner.
    pub min: Vector3,
    /// Upper corner.
    pub max: Vector3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    /// Create bounds from two corners, reordering components as needed.
    pub fn new(a: Vector3, b: Vector3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Degenerate bounds at the origin.
    pub fn empty() -> Self {
        Self {
            min: Vector3::ZERO,
            max: Vector3::ZERO,
        }
    }

    /// Unit cube `[0, 1]^3`.
    pub fn unit() -> Self {
        Self {
            min: Vector3::ZERO,
            max: Vector3::ONE,
        }
    }

    /// Center point.
    pub fn center(&self) -> Vector3 {
        (self.min + self.max) / 2.0
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.size().x
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.size().y
    }

    /// Extent along Z.
    pub fn depth(&self) -> f64 {
        self.size().z
    }

    /// Return `true` when `point` is inside or on the boundary.
    pub fn contains(&self, point: Vector3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Smallest bounds containing both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Image size in pixels, serialized as `[width, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a validated resolution (both sides non-zero).
    pub fn new(width: u32, height: u32) -> BraynsResult<Self> {
        if width == 0 || height == 0 {
            return Err(BraynsError::validation(format!(
                "resolution must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// 1920x1080.
    pub const fn full_hd() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }

    /// 3840x2160.
    pub const fn ultra_hd() -> Self {
        Self {
            width: 3840,
            height: 2160,
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl From<[u32; 2]> for Resolution {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

impl From<Resolution> for [u32; 2] {
    fn from(r: Resolution) -> Self {
        [r.width, r.height]
    }
}

/// Encoded image format understood by the service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    /// Lossless PNG.
    #[default]
    #[serde(rename = "png")]
    Png,
    /// JPEG with a quality setting.
    #[serde(rename = "jpg")]
    Jpeg,
}

impl ImageFormat {
    /// Wire name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Guess the format from a file extension (`.png`, `.jpg`, `.jpeg`).
    pub fn from_path(path: impl AsRef<Path>) -> BraynsResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                BraynsError::validation(format!(
                    "cannot deduce image format of '{}' (missing extension)",
                    path.display()
                ))
            })?;
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(BraynsError::validation(format!(
                "unsupported image format '{other}' (expected png or jpg)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

use crate::foundation::color::Color4;
use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::instance::Instance;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Data range mapped onto a color ramp, `[min, max]` on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ValueRange {
    /// Value mapped to the first color.
    pub min: f64,
    /// Value mapped to the last color.
    pub max: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl ValueRange {
    /// Range `[min, max]`; fails when `min > max`.
    pub fn new(min: f64, max: f64) -> BraynsResult<Self> {
        if min > max {
            return Err(BraynsError::validation(format!(
                "invalid value range [{min}, {max}]"
            )));
        }
        Ok(Self { min, max })
    }

    /// `max - min`.
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` in the range, clamped to `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.size() <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / self.size()).clamp(0.0, 1.0)
    }
}

impl From<[f64; 2]> for ValueRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<ValueRange> for [f64; 2] {
    fn from(range: ValueRange) -> Self {
        [range.min, range.max]
    }
}

/// Transfer function mapping simulation values to colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    /// Mapped range.
    #[serde(rename = "range")]
    pub value_range: ValueRange,
    /// Colors evenly spread over the range.
    pub colors: Vec<Color4>,
}

impl ColorRamp {
    /// Color of `value`, linearly interpolated between the two nearest colors.
    pub fn color_at(&self, value: f64) -> Option<Color4> {
        let last = self.colors.len().checked_sub(1)?;
        let position = self.value_range.normalize(value) * last as f64;
        let index = (position.floor() as usize).min(last);
        let next = (index + 1).min(last);
        let t = position - index as f64;
        let (a, b) = (self.colors[index], self.colors[next]);
        Some(Color4::new(
            a.r + (b.r - a.r) * t,
            a.g + (b.g - a.g) * t,
            a.b + (b.b - a.b) * t,
            a.a + (b.a - a.a) * t,
        ))
    }
}

/// Color ramp of model `id`.
pub async fn get_color_ramp(instance: &Instance, id: u32) -> BraynsResult<ColorRamp> {
    instance.request_as("get-color-ramp", &json!({ "id": id })).await
}

/// Replace the color ramp of model `id`.
pub async fn set_color_ramp(instance: &Instance, id: u32, ramp: &ColorRamp) -> BraynsResult<()> {
    if ramp.colors.is_empty() {
        return Err(BraynsError::validation("color ramp needs at least one color"));
    }
    let params = json!({ "id": id, "color_ramp": ramp });
    instance
        .request_as::<_, Value>("set-color-ramp", &params)
        .await
        .map(|_| ())
}

#[cfg(test)]
#[path = "../../tests/unit/model/color_ramp.rs"]
mod tests;

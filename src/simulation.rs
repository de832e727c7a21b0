//! Simulation timeline.

use crate::foundation::error::BraynsResult;
use crate::network::instance::Instance;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Simulation timeline of the scene; all loaded reports share it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// First frame index.
    pub start_frame: u32,
    /// Last frame index.
    pub end_frame: u32,
    /// Time between two frames, in `time_unit`.
    #[serde(rename = "dt")]
    pub delta_time: f64,
    /// Time unit (`ms`, ...).
    #[serde(rename = "unit")]
    pub time_unit: String,
    /// Current frame index.
    pub current: u32,
}

impl Simulation {
    /// Number of frames in the timeline.
    pub fn frame_count(&self) -> u32 {
        self.end_frame
            .checked_sub(self.start_frame)
            .map_or(0, |n| n.saturating_add(1))
    }

    /// Time between first and last frame.
    pub fn duration(&self) -> f64 {
        f64::from(self.end_frame.saturating_sub(self.start_frame)) * self.delta_time
    }

    /// Frames per time unit.
    pub fn fps(&self) -> f64 {
        1.0 / self.delta_time
    }

    /// Frame closest to `time` (from the first frame), clamped to the timeline.
    pub fn get_frame(&self, time: f64) -> u32 {
        if self.delta_time <= 0.0 {
            return self.start_frame;
        }
        let offset = (time / self.delta_time).round().max(0.0);
        let last = f64::from(self.end_frame.saturating_sub(self.start_frame));
        self.start_frame + offset.min(last) as u32
    }

    /// Time of `frame` from the first frame.
    pub fn get_time(&self, frame: u32) -> f64 {
        f64::from(frame.saturating_sub(self.start_frame)) * self.delta_time
    }
}

/// Current simulation timeline.
pub async fn get_simulation(instance: &Instance) -> BraynsResult<Simulation> {
    instance
        .request_as("get-simulation-parameters", &Value::Null)
        .await
}

/// Move the timeline to `frame`.
pub async fn set_simulation_frame(instance: &Instance, frame: u32) -> BraynsResult<()> {
    instance
        .request("set-simulation-parameters", json!({ "current": frame }))
        .await
        .map(|_| ())
}

/// Show or hide the simulation colors of model `model_id`.
pub async fn enable_simulation(instance: &Instance, model_id: u32, enabled: bool) -> BraynsResult<()> {
    instance
        .request("enable-simulation", json!({ "model_id": model_id, "enabled": enabled }))
        .await
        .map(|_| ())
}

#[cfg(test)]
#[path = "../tests/unit/application/simulation.rs"]
mod tests;

use panespace_base::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Fly speed in world units per second.
    pub move_speed: f64,
    /// Radians of camera turn per pixel of cursor offset from the viewport centre.
    pub mouse_sensitivity: f64,
    pub scale_gain: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Pixels of vertical drag per camera-to-proxy distance in depth moves.
    pub depth_drag_divisor: f64,
    /// Pixels of drag per radian in plane moves.
    pub plane_drag_divisor: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            mouse_sensitivity: 0.005,
            scale_gain: 5.0,
            min_scale: 0.03,
            max_scale: 10.0,
            depth_drag_divisor: 60.0,
            plane_drag_divisor: 800.0,
        }
    }
}

impl InteractionSettings {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("move_speed", self.move_speed),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("scale_gain", self.scale_gain),
            ("min_scale", self.min_scale),
            ("depth_drag_divisor", self.depth_drag_divisor),
            ("plane_drag_divisor", self.plane_drag_divisor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return Err(Error::InvalidParameter(format!(
                "max_scale ({}) must not be below min_scale ({})",
                self.max_scale, self.min_scale
            )));
        }
        Ok(())
    }
}

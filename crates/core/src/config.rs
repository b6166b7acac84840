use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub gesture: GestureSettings,
    pub fpv: FpvSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            gesture: GestureSettings::default(),
            fpv: FpvSettings::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(data: &str) -> Result<Self, String> {
        serde_json::from_str(data).map_err(|err| format!("settings parse failed: {err}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureSettings {
    /// Yaw radians per pixel of horizontal one-finger drag.
    pub rotate_sensitivity: f32,
    /// Horizontal travel below this stays a tap.
    pub drag_threshold_px: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// How long after touch-end a finished drag still suppresses taps.
    pub drag_release_ms: f64,
    /// Scene input is ignored for this long after any UI-targeted touch.
    pub ui_cooldown_ms: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.01,
            drag_threshold_px: 10.0,
            scale_min: 0.1,
            scale_max: 5.0,
            drag_release_ms: 100.0,
            ui_cooldown_ms: 200.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FpvSettings {
    /// Uniform scale multiplier applied to the entered object.
    pub scale_factor: f32,
    pub player_height: f32,
    pub player_radius: f32,
    pub base_speed: f32,
    pub speed_multiplier: f32,
    /// Speed applied while an up/down control is held.
    pub vertical_speed: f32,
    /// Joystick components at or below this magnitude are ignored.
    pub dead_zone: f32,
}

impl Default for FpvSettings {
    fn default() -> Self {
        Self {
            scale_factor: 20.0,
            player_height: 1.8,
            player_radius: 0.5,
            base_speed: 0.1,
            speed_multiplier: 1.0,
            vertical_speed: 0.05,
            dead_zone: 0.1,
        }
    }
}

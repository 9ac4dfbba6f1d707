use serde::{Deserialize, Serialize};

/// Movement and interaction tuning. Speeds and forces are in blocks per
/// tick; the simulation is frame-driven.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub friction: f32,
    pub mouse_sensitivity: f32,
    pub max_reach: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            walk_speed: 0.1,
            run_speed: 0.16,
            jump_force: 0.2,
            gravity: 0.01,
            friction: 0.9,
            mouse_sensitivity: 0.002,
            max_reach: 5.0,
        }
    }
}

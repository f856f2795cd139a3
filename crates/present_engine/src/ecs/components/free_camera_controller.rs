//! Free camera controller component
//!
//! Tuning for the fly camera; paired with a [`CameraComponent`] on the same
//! entity it also identifies the player rig.
//!
//! [`CameraComponent`]: super::CameraComponent

use serde::{Deserialize, Serialize};

/// Fly camera sensitivities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeCameraControllerComponent {
    /// Radians of rotation per pixel of mouse movement
    pub rotation_sensitivity: f32,
    /// Units per second of translation
    pub position_sensitivity: f32,
    /// Translation multiplier while sprinting
    pub speedup_factor: f32,
    /// Radians of field-of-view change per scroll step
    pub fov_sensitivity: f32,
}

impl Default for FreeCameraControllerComponent {
    fn default() -> Self {
        Self {
            rotation_sensitivity: 0.01,
            position_sensitivity: 3.0,
            speedup_factor: 5.0,
            fov_sensitivity: 0.3,
        }
    }
}

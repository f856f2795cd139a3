//! Random movement component
//!
//! Entities wander inside a box on the XZ plane, bouncing off its walls and
//! picking a new random speed on each bounce.

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Wandering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomMovementComponent {
    /// Current speed per axis (always non-negative; sign lives in `direction`)
    pub linear_velocity: Vec3,
    /// Upper bound (exclusive) for newly drawn speeds
    pub max_linear_velocity: Vec3,
    /// Lower corner of the wandering box
    pub min_boundary: Vec3,
    /// Upper corner of the wandering box
    pub max_boundary: Vec3,
    /// Per-axis heading, each component ±1
    pub direction: Vec3,
}

impl Default for RandomMovementComponent {
    fn default() -> Self {
        Self {
            linear_velocity: Vec3::zeros(),
            max_linear_velocity: Vec3::new(7.0, 0.0, 7.0),
            min_boundary: Vec3::new(-100.0, -100.0, -100.0),
            max_boundary: Vec3::new(100.0, 100.0, 100.0),
            direction: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl RandomMovementComponent {
    /// Wander at `linear_velocity` inside the given box
    pub fn new(linear_velocity: Vec3, min_boundary: Vec3, max_boundary: Vec3) -> Self {
        Self {
            linear_velocity,
            min_boundary,
            max_boundary,
            ..Default::default()
        }
    }
}

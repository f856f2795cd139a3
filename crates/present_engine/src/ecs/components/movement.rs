//! Movement component for entities that drift at a constant rate

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Constant linear and angular velocity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementComponent {
    /// Linear velocity in units per second
    pub linear_velocity: Vec3,

    /// Angular velocity in radians per second (Euler rates)
    pub angular_velocity: Vec3,
}

impl MovementComponent {
    /// Create a movement component with the given rates
    pub fn new(linear_velocity: Vec3, angular_velocity: Vec3) -> Self {
        Self {
            linear_velocity,
            angular_velocity,
        }
    }

    /// Spin in place
    pub fn spinning(angular_velocity: Vec3) -> Self {
        Self::new(Vec3::zeros(), angular_velocity)
    }
}

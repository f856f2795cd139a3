//! Lighting component for ECS
//!
//! Pure data component: the light's placement comes from its owning entity's
//! world matrix, which the renderer samples each frame.

use crate::foundation::math::{utils, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Types of lights supported by the forward renderer
///
/// Discriminants match the `lights[i].type` shader uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LightType {
    /// Directional light (like sunlight) with parallel rays
    #[default]
    Directional = 0,
    /// Point light that radiates in all directions from a position
    Point = 1,
    /// Spot light that creates a cone of light from a position
    Spot = 2,
}

/// Pure data component for lights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightComponent {
    /// The type of light
    pub light_type: LightType,
    /// RGB color
    pub color: Vec3,
    /// Constant, linear and quadratic attenuation (point and spot lights)
    pub attenuation: Vec3,
    /// Inner and outer cone angles in radians (spot lights)
    pub cone_angles: Vec2,
}

impl Default for LightComponent {
    fn default() -> Self {
        Self {
            light_type: LightType::Directional,
            color: Vec3::new(1.0, 0.9, 0.7),
            attenuation: Vec3::new(0.0, 0.0, 1.0),
            cone_angles: Vec2::new(utils::deg_to_rad(15.0), utils::deg_to_rad(30.0)),
        }
    }
}

impl LightComponent {
    /// Directional light of the given color
    pub fn directional(color: Vec3) -> Self {
        Self {
            light_type: LightType::Directional,
            color,
            ..Default::default()
        }
    }

    /// Point light with attenuation coefficients
    pub fn point(color: Vec3, attenuation: Vec3) -> Self {
        Self {
            light_type: LightType::Point,
            color,
            attenuation,
            ..Default::default()
        }
    }

    /// Spot light with attenuation and inner/outer cone angles (radians)
    pub fn spot(color: Vec3, attenuation: Vec3, inner: f32, outer: f32) -> Self {
        Self {
            light_type: LightType::Spot,
            color,
            attenuation,
            cone_angles: Vec2::new(inner, outer),
        }
    }
}

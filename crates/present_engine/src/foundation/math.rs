//! Math utilities and types
//!
//! Provides fundamental math types for 3D graphics and game development.

use serde::{Deserialize, Serialize};

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Local transform of an entity: position, Euler rotation and scale
///
/// Rotation is stored as Euler angles in radians and applied yaw (Y), then
/// pitch (X), then roll (Z), matching `Ry * Rx * Rz`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec3,

    /// Euler angles in radians (x = pitch, y = yaw, z = roll)
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set Euler rotation (radians)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Rotation part of the transform as a homogeneous matrix
    pub fn rotation_matrix(&self) -> Mat4 {
        yaw_pitch_roll(self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// Convert to a transformation matrix (translate * rotate * scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation_matrix()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Rotation matrix for yaw (Y), pitch (X) and roll (Z), composed `Ry * Rx * Rz`
pub fn yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Mat4 {
    Mat4::from_axis_angle(&Vec3::y_axis(), yaw)
        * Mat4::from_axis_angle(&Vec3::x_axis(), pitch)
        * Mat4::from_axis_angle(&Vec3::z_axis(), roll)
}

/// Transform a point (w = 1) by a matrix, dropping the homogeneous coordinate
pub fn transform_point(matrix: &Mat4, point: Vec3) -> Vec3 {
    let p = matrix * Vec4::new(point.x, point.y, point.z, 1.0);
    Vec3::new(p.x, p.y, p.z)
}

/// Transform a direction (w = 0) by a matrix
pub fn transform_direction(matrix: &Mat4, direction: Vec3) -> Vec3 {
    let d = matrix * Vec4::new(direction.x, direction.y, direction.z, 0.0);
    Vec3::new(d.x, d.y, d.z)
}

/// Screen-space viewport rectangle in pixels, origin at the lower-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Lower-left corner x in pixels
    pub x: i32,
    /// Lower-left corner y in pixels
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport from origin and size
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport anchored at the origin
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, or 1.0 for an empty viewport
    pub fn aspect_ratio(&self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Wrap an angle into `[0, 2π)`
    pub fn wrap_angle(angle: f32) -> f32 {
        angle.rem_euclid(constants::TAU)
    }

    /// Sign of a value with zero mapping to zero
    pub fn sign(value: f32) -> f32 {
        if value > 0.0 {
            1.0
        } else if value < 0.0 {
            -1.0
        } else {
            0.0
        }
    }
}

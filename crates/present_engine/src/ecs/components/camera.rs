//! Camera component
//!
//! The camera looks down its owner's local -Z axis with local +Y as up; the
//! owner's world matrix is supplied by the caller.

use crate::foundation::math::{transform_direction, transform_point, utils, Mat4, Point3, Vec3, Viewport};
use serde::{Deserialize, Serialize};

/// Projection model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraType {
    /// Perspective projection driven by `fov_y`
    #[default]
    Perspective,
    /// Orthographic projection driven by `ortho_height`
    Orthographic,
}

/// Camera parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraComponent {
    /// Projection model
    pub camera_type: CameraType,
    /// Vertical field of view in radians (perspective)
    pub fov_y: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Visible height in world units (orthographic)
    pub ortho_height: f32,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            camera_type: CameraType::Perspective,
            fov_y: utils::deg_to_rad(90.0),
            near: 0.01,
            far: 100.0,
            ortho_height: 1.0,
        }
    }
}

impl CameraComponent {
    /// Perspective camera
    pub fn perspective(fov_y: f32, near: f32, far: f32) -> Self {
        Self {
            camera_type: CameraType::Perspective,
            fov_y,
            near,
            far,
            ..Default::default()
        }
    }

    /// World-space eye position of a camera owned by an entity with `world_matrix`
    pub fn eye(world_matrix: &Mat4) -> Vec3 {
        transform_point(world_matrix, Vec3::zeros())
    }

    /// World-space forward direction (local -Z)
    pub fn forward(world_matrix: &Mat4) -> Vec3 {
        transform_direction(world_matrix, Vec3::new(0.0, 0.0, -1.0))
    }

    /// View matrix for a camera owned by an entity with `world_matrix`
    pub fn view_matrix(&self, world_matrix: &Mat4) -> Mat4 {
        let eye = Self::eye(world_matrix);
        let center = transform_point(world_matrix, Vec3::new(0.0, 0.0, -1.0));
        let up = transform_direction(world_matrix, Vec3::new(0.0, 1.0, 0.0));
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(center), &up)
    }

    /// Projection matrix for the given viewport
    pub fn projection_matrix(&self, viewport: Viewport) -> Mat4 {
        let aspect = viewport.aspect_ratio();
        match self.camera_type {
            CameraType::Perspective => Mat4::new_perspective(aspect, self.fov_y, self.near, self.far),
            CameraType::Orthographic => {
                let half_height = self.ortho_height * 0.5;
                let half_width = half_height * aspect;
                Mat4::new_orthographic(-half_width, half_width, -half_height, half_height, self.near, self.far)
            }
        }
    }
}

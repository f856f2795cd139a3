//! Fly camera controller
//!
//! Input isn't polled here: the driver hands the system a
//! [`ControllerInput`] snapshot before each frame.

use super::System;
use crate::ecs::components::{CameraComponent, FreeCameraControllerComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::{constants, transform_direction, utils, Vec2, Vec3};

/// Input state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    /// Move along the camera's front axis (W)
    pub forward: bool,
    /// Move against the camera's front axis (S)
    pub backward: bool,
    /// Move against the camera's right axis (A)
    pub left: bool,
    /// Move along the camera's right axis (D)
    pub right: bool,
    /// Move along the camera's up axis (Q)
    pub up: bool,
    /// Move against the camera's up axis (E)
    pub down: bool,
    /// Multiply translation speed by the speedup factor (shift)
    pub sprint: bool,
    /// Mouse look is engaged (button held)
    pub look_active: bool,
    /// Cursor movement in pixels since the last frame
    pub mouse_delta: Vec2,
    /// Vertical scroll since the last frame
    pub scroll: f32,
}

/// Moves the first entity carrying both a camera and a controller
#[derive(Debug, Default)]
pub struct FreeCameraControllerSystem {
    input: ControllerInput,
}

const PITCH_LIMIT: f32 = constants::HALF_PI * 0.99;
const FOV_MIN: f32 = constants::PI * 0.01;
const FOV_MAX: f32 = constants::PI * 0.99;

impl FreeCameraControllerSystem {
    /// Create the system with no input
    pub fn new() -> Self {
        Self::default()
    }

    /// Input applied on the next update
    pub fn set_input(&mut self, input: ControllerInput) {
        self.input = input;
    }

    /// Current input snapshot
    pub fn input(&self) -> &ControllerInput {
        &self.input
    }

    fn find_rig(world: &World) -> Option<(Entity, FreeCameraControllerComponent)> {
        world
            .query::<FreeCameraControllerComponent>()
            .into_iter()
            .find(|(entity, _)| world.has_component::<CameraComponent>(*entity))
            .map(|(entity, controller)| (entity, controller.clone()))
    }
}

impl System for FreeCameraControllerSystem {
    fn name(&self) -> &'static str {
        "free_camera_controller"
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        let Some((entity, controller)) = Self::find_rig(world) else {
            return;
        };
        let input = self.input;

        if input.scroll != 0.0 {
            if let Some(camera) = world.get_component_mut::<CameraComponent>(entity) {
                camera.fov_y = (camera.fov_y - input.scroll * controller.fov_sensitivity).clamp(FOV_MIN, FOV_MAX);
            }
        }

        let Some(transform) = world.local_transform_mut(entity) else {
            return;
        };

        if input.look_active {
            transform.rotation.x -= input.mouse_delta.y * controller.rotation_sensitivity;
            transform.rotation.y -= input.mouse_delta.x * controller.rotation_sensitivity;
        }
        transform.rotation.x = transform.rotation.x.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        transform.rotation.y = utils::wrap_angle(transform.rotation.y);

        // Axes come from the local matrix, so they follow the rotation just applied
        let matrix = transform.to_matrix();
        let front = transform_direction(&matrix, Vec3::new(0.0, 0.0, -1.0));
        let up = transform_direction(&matrix, Vec3::new(0.0, 1.0, 0.0));
        let right = transform_direction(&matrix, Vec3::new(1.0, 0.0, 0.0));

        let mut speed = controller.position_sensitivity;
        if input.sprint {
            speed *= controller.speedup_factor;
        }
        let step = speed * delta_time;

        let axis = |positive: bool, negative: bool| f32::from(u8::from(positive)) - f32::from(u8::from(negative));
        transform.position += front * (axis(input.forward, input.backward) * step)
            + up * (axis(input.up, input.down) * step)
            + right * (axis(input.right, input.left) * step);
    }
}

//! ECS Systems module

pub mod collision;
pub mod free_camera_controller;
pub mod movement;
pub mod random_movement;

pub use collision::{ColliderSystem, CollisionEffect, CollisionEvent, CollisionOutcome};
pub use free_camera_controller::{ControllerInput, FreeCameraControllerSystem};
pub use movement::MovementSystem;
pub use random_movement::RandomMovementSystem;

use crate::ecs::World;

/// A per-frame world update
pub trait System {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Advance the system by one frame
    fn update(&mut self, world: &mut World, delta_time: f32);
}

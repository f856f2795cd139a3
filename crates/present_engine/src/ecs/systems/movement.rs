//! Constant-velocity movement

use super::System;
use crate::ecs::components::MovementComponent;
use crate::ecs::World;

/// Integrates [`MovementComponent`] velocities into local transforms
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        let moving: Vec<_> = world
            .query::<MovementComponent>()
            .into_iter()
            .map(|(entity, movement)| (entity, movement.linear_velocity, movement.angular_velocity))
            .collect();

        for (entity, linear, angular) in moving {
            if let Some(transform) = world.local_transform_mut(entity) {
                transform.position += linear * delta_time;
                transform.rotation += angular * delta_time;
            }
        }
    }
}

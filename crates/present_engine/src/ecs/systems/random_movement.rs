//! Random wandering inside a bounding box
//!
//! Entities move at `linear_velocity * direction`. Crossing the X or Z bounds
//! flips that direction component and draws a new integer speed for one axis;
//! which axis gets the new speed alternates between bounces.

use super::System;
use crate::config::RandomMovementConfig;
use crate::ecs::components::RandomMovementComponent;
use crate::ecs::World;
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Axis whose speed is redrawn on the next bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedAxis {
    /// X speed
    X,
    /// Z speed
    Z,
}

impl SpeedAxis {
    fn other(self) -> Self {
        match self {
            Self::X => Self::Z,
            Self::Z => Self::X,
        }
    }
}

/// Moves [`RandomMovementComponent`] entities
pub struct RandomMovementSystem {
    rng: StdRng,
    next_axis: SpeedAxis,
}

impl RandomMovementSystem {
    /// Create the system, seeding the RNG from config or from entropy
    pub fn new(config: RandomMovementConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            next_axis: SpeedAxis::Z,
        }
    }

    /// Axis that will receive the next random speed
    pub fn next_axis(&self) -> SpeedAxis {
        self.next_axis
    }

    fn redraw_speed(&mut self, movement: &mut RandomMovementComponent) {
        let (speed, max) = match self.next_axis {
            SpeedAxis::X => (&mut movement.linear_velocity.x, movement.max_linear_velocity.x),
            SpeedAxis::Z => (&mut movement.linear_velocity.z, movement.max_linear_velocity.z),
        };
        // Whole-number speeds in [0, max)
        let upper = max.floor();
        *speed = if upper >= 1.0 {
            self.rng.gen_range(0.0..upper).floor()
        } else {
            0.0
        };
        trace!("Random movement: new {:?} speed {}", self.next_axis, speed);
        self.next_axis = self.next_axis.other();
    }
}

impl System for RandomMovementSystem {
    fn name(&self) -> &'static str {
        "random_movement"
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        let entities: Vec<_> = world.entities_with::<RandomMovementComponent>().collect();

        for entity in entities {
            let Some(mut transform) = world.local_transform(entity).copied() else {
                continue;
            };
            let Some(movement) = world.get_component_mut::<RandomMovementComponent>(entity) else {
                continue;
            };

            transform.position += movement.linear_velocity.component_mul(&movement.direction) * delta_time;

            let x = transform.position.x;
            if x >= movement.max_boundary.x || x <= movement.min_boundary.x {
                movement.direction.x = -movement.direction.x;
                self.redraw_speed(movement);
            }
            let z = transform.position.z;
            if z >= movement.max_boundary.z || z <= movement.min_boundary.z {
                movement.direction.z = -movement.direction.z;
                self.redraw_speed(movement);
            }

            world.set_local_transform(entity, transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Transform, Vec3};
    use approx::assert_relative_eq;

    fn seeded() -> RandomMovementSystem {
        RandomMovementSystem::new(RandomMovementConfig { seed: Some(7) })
    }

    #[test]
    fn test_moves_by_velocity_times_direction() {
        let mut world = World::new();
        let entity = world.create_entity();
        let mut movement = RandomMovementComponent::new(Vec3::new(2.0, 0.0, 4.0), Vec3::repeat(-100.0), Vec3::repeat(100.0));
        movement.direction = Vec3::new(1.0, 1.0, -1.0);
        world.add_component(entity, movement);

        seeded().update(&mut world, 0.5);
        assert_relative_eq!(world.local_transform(entity).unwrap().position, Vec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn test_bounce_flips_direction_and_alternates_axis() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.set_local_transform(entity, Transform::from_position(Vec3::new(9.5, 0.0, 0.0)));
        world.add_component(
            entity,
            RandomMovementComponent::new(Vec3::new(1.0, 0.0, 0.0), Vec3::repeat(-10.0), Vec3::repeat(10.0)),
        );

        let mut system = seeded();
        assert_eq!(system.next_axis(), SpeedAxis::Z);
        system.update(&mut world, 1.0);

        let movement = world.get_component::<RandomMovementComponent>(entity).unwrap();
        assert_relative_eq!(movement.direction.x, -1.0);
        assert_relative_eq!(movement.direction.z, 1.0);
        assert!((0.0..7.0).contains(&movement.linear_velocity.z));
        assert_eq!(movement.linear_velocity.z.fract(), 0.0);
        assert_eq!(system.next_axis(), SpeedAxis::X);
    }

    #[test]
    fn test_bounce_persists_across_frames() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.set_local_transform(entity, Transform::from_position(Vec3::new(9.5, 0.0, 0.0)));
        let mut movement = RandomMovementComponent::new(Vec3::new(1.0, 0.0, 0.0), Vec3::repeat(-10.0), Vec3::repeat(10.0));
        movement.max_linear_velocity = Vec3::new(0.0, 0.0, 5.0);
        world.add_component(entity, movement);

        let mut system = seeded();
        system.update(&mut world, 1.0);
        // Moving back inside the bounds keeps the flipped direction and speed
        system.update(&mut world, 1.0);

        let movement = world.get_component::<RandomMovementComponent>(entity).unwrap();
        assert_relative_eq!(movement.direction.x, -1.0);
        assert_relative_eq!(movement.linear_velocity.x, 1.0);
        assert_relative_eq!(world.local_transform(entity).unwrap().position.x, 9.5);
        assert_eq!(system.next_axis(), SpeedAxis::X);
    }

    #[test]
    fn test_zero_max_speed_stops_axis() {
        let mut system = seeded();
        let mut movement = RandomMovementComponent {
            linear_velocity: Vec3::new(3.0, 0.0, 3.0),
            max_linear_velocity: Vec3::zeros(),
            ..Default::default()
        };
        system.redraw_speed(&mut movement);
        assert_relative_eq!(movement.linear_velocity.z, 0.0);
        system.redraw_speed(&mut movement);
        assert_relative_eq!(movement.linear_velocity.x, 0.0);
    }

    #[test]
    fn test_same_seed_same_speeds() {
        let mut a = seeded();
        let mut b = seeded();
        let mut ma = RandomMovementComponent::default();
        let mut mb = RandomMovementComponent::default();
        for _ in 0..4 {
            a.redraw_speed(&mut ma);
            b.redraw_speed(&mut mb);
        }
        assert_eq!(ma.linear_velocity, mb.linear_velocity);
    }
}

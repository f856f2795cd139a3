//! Fixed-order frame scheduling
//!
//! Every frame runs the same sequence of phases, one after another on the
//! caller's thread: movement, camera controller, collision, random movement
//! and finally render. Collision sees transforms already advanced by movement
//! and the renderer sees the frame's final transforms and visibility flags.

use super::systems::{
    ColliderSystem, CollisionOutcome, ControllerInput, FreeCameraControllerSystem, MovementSystem, RandomMovementSystem,
    System,
};
use super::World;
use crate::config::CoreConfig;
use crate::foundation::math::Viewport;
use crate::foundation::time::FrameClock;
use crate::game::{Game, GameState};
use crate::render::{AssetRegistry, ForwardRenderer, RenderBackend, RenderError, RenderOutcome};
use log::trace;

/// Scheduler phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FramePhase {
    /// Constant-velocity movement
    Movement,
    /// Fly camera input
    CameraController,
    /// Collision responses and game counters
    Collision,
    /// Random wandering
    RandomMovement,
    /// Forward rendering
    Render,
}

impl FramePhase {
    /// Execution order within a frame
    pub const ORDER: [Self; 5] = [
        Self::Movement,
        Self::CameraController,
        Self::Collision,
        Self::RandomMovement,
        Self::Render,
    ];
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Collision phase result
    pub collision: CollisionOutcome,
    /// Render phase result
    pub render: RenderOutcome,
    /// Game state after the frame
    pub state: GameState,
}

/// Owns the per-frame systems and runs them in [`FramePhase::ORDER`]
pub struct FrameScheduler {
    movement: MovementSystem,
    camera_controller: FreeCameraControllerSystem,
    collider: ColliderSystem,
    random_movement: RandomMovementSystem,
    renderer: ForwardRenderer,
    clock: FrameClock,
}

impl FrameScheduler {
    /// Build every system from the configuration
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            movement: MovementSystem::new(),
            camera_controller: FreeCameraControllerSystem::new(),
            collider: ColliderSystem::new(config.collision),
            random_movement: RandomMovementSystem::new(config.random_movement),
            renderer: ForwardRenderer::new(config.renderer),
            clock: FrameClock::new(),
        }
    }

    /// Input for the camera controller on the next frame
    pub fn set_input(&mut self, input: ControllerInput) {
        self.camera_controller.set_input(input);
    }

    /// Collision system, for inspecting events
    pub fn collider(&self) -> &ColliderSystem {
        &self.collider
    }

    /// Collision system, for resetting after repopulating the world
    pub fn collider_mut(&mut self) -> &mut ColliderSystem {
        &mut self.collider
    }

    /// Renderer, for inspecting the last frame's queue
    pub fn renderer(&self) -> &ForwardRenderer {
        &self.renderer
    }

    /// Frame counter and simulated time
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Run one frame
    ///
    /// Render errors abort the frame after the simulation phases have run.
    pub fn run_frame(
        &mut self,
        world: &mut World,
        assets: &AssetRegistry,
        game: &mut Game,
        backend: &mut dyn RenderBackend,
        viewport: Viewport,
        delta_time: f32,
    ) -> Result<FrameReport, RenderError> {
        self.clock.advance(delta_time);
        let mut collision = CollisionOutcome::NoMainCharacter;
        let mut render = RenderOutcome::NoCamera;

        for phase in FramePhase::ORDER {
            trace!("Frame {}: {:?}", self.clock.frame_count(), phase);
            match phase {
                FramePhase::Movement => self.movement.update(world, delta_time),
                FramePhase::CameraController => self.camera_controller.update(world, delta_time),
                FramePhase::Collision => collision = self.collider.update(world, assets, delta_time, game),
                FramePhase::RandomMovement => self.random_movement.update(world, delta_time),
                FramePhase::Render => render = self.renderer.render(world, assets, backend, viewport)?,
            }
        }

        Ok(FrameReport {
            collision,
            render,
            state: game.state(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        assert_eq!(
            FramePhase::ORDER,
            [
                FramePhase::Movement,
                FramePhase::CameraController,
                FramePhase::Collision,
                FramePhase::RandomMovement,
                FramePhase::Render,
            ]
        );
        assert!(FramePhase::ORDER.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_world_frame() {
        let mut scheduler = FrameScheduler::new(&CoreConfig::default());
        let mut world = World::new();
        let assets = AssetRegistry::new();
        let mut game = Game::default();
        let mut backend = crate::render::RecordingBackend::new();

        let report = scheduler
            .run_frame(&mut world, &assets, &mut game, &mut backend, Viewport::from_size(640, 480), 0.016)
            .unwrap();

        assert_eq!(report.collision, CollisionOutcome::NoMainCharacter);
        assert_eq!(report.render, RenderOutcome::NoCamera);
        assert_eq!(report.state, GameState::Playing);
        assert_eq!(scheduler.clock().frame_count(), 1);
    }
}

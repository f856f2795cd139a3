//! # Present Engine
//!
//! Engine core for a small present-collecting game: a scene graph of entities
//! with hierarchical transforms, a forward renderer that draws one camera per
//! frame, and a collision engine that drives the game's hearts, presents and
//! win/lose state.
//!
//! ## Features
//!
//! - **Scene Graph**: Entities with weak parent links and on-demand world matrices
//! - **Forward Rendering**: Opaque, sorted transparent and overlay buckets behind a backend trait
//! - **Collision**: AABB overlap between the player and boundaries, presents and hazards
//! - **Deterministic Frames**: Systems run single-threaded in a fixed order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use present_engine::prelude::*;
//!
//! let config = CoreConfig::default();
//! let mut scheduler = FrameScheduler::new(&config);
//! let mut world = World::new();
//! let assets = AssetRegistry::new();
//! let mut game = Game::new(config.game);
//! let mut backend = RecordingBackend::new();
//!
//! let report = scheduler
//!     .run_frame(&mut world, &assets, &mut game, &mut backend, Viewport::from_size(1280, 720), 1.0 / 60.0)
//!     .expect("frame failed");
//! assert_eq!(report.state, GameState::Playing);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod game;
pub mod physics;
pub mod render;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError, CoreConfig, GameConfig, RandomMovementConfig, RendererConfig},
        ecs::{
            components::{
                CameraComponent, CollidingType, FreeCameraControllerComponent, LightComponent, LightType,
                MeshRendererComponent, MovementComponent, RandomMovementComponent, RenderKind,
            },
            systems::{CollisionOutcome, ControllerInput},
            Component, Entity, FramePhase, FrameReport, FrameScheduler, System, World,
        },
        foundation::math::{Mat4, Transform, Vec2, Vec3, Vec4, Viewport},
        game::{Game, GameState},
        physics::Aabb,
        render::{
            AssetRegistry, ForwardRenderer, Material, MaterialKind, Mesh, PipelineState, RecordingBackend,
            RenderBackend, RenderError, RenderOutcome,
        },
    };
}

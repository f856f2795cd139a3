//! ECS Components module
//!
//! Pure data attached to entities; behavior lives in the systems.

pub mod camera;
pub mod free_camera_controller;
pub mod lighting;
pub mod mesh_renderer;
pub mod movement;
pub mod random_movement;

pub use camera::{CameraComponent, CameraType};
pub use free_camera_controller::FreeCameraControllerComponent;
pub use lighting::{LightComponent, LightType};
pub use mesh_renderer::{CollidingType, MeshRendererComponent, RenderKind};
pub use movement::MovementComponent;
pub use random_movement::RandomMovementComponent;

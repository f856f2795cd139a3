//! Component trait and implementations

/// Marker trait for components
///
/// An entity holds at most one instance of each component type.
pub trait Component: 'static + Send + Sync {}

// Implement Component for engine components
impl Component for crate::ecs::components::MeshRendererComponent {}
impl Component for crate::ecs::components::LightComponent {}
impl Component for crate::ecs::components::CameraComponent {}
impl Component for crate::ecs::components::FreeCameraControllerComponent {}
impl Component for crate::ecs::components::MovementComponent {}
impl Component for crate::ecs::components::RandomMovementComponent {}

//! Mesh renderer component
//!
//! Marks an entity as drawable and classifies how it reacts when the main
//! character touches it.

use crate::render::assets::{MaterialHandle, MeshHandle};
use serde::{Deserialize, Serialize};

/// How collision with the main character is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollidingType {
    /// Walls: the camera is rolled back to its last safe transform
    Boundary,
    /// Presents: hidden and counted on first touch
    Collectable,
    /// No collision response
    #[default]
    Ignore,
    /// Hazards: cost a heart, gated by a recovery cooldown
    Avoidable,
}

/// Role of the renderable in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderKind {
    /// The main character (or ordinary scene geometry)
    #[default]
    Main,
    /// On-screen present counter icon
    Present,
    /// On-screen heart counter icon
    Heart,
}

/// Component for entities that can be rendered
///
/// Mesh and material are registry handles; the registry owns the assets.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRendererComponent {
    /// Mesh to draw
    pub mesh: MeshHandle,

    /// Material used to draw the mesh
    pub material: MaterialHandle,

    /// Collision response class
    pub colliding_type: CollidingType,

    /// Gameplay role
    pub kind: RenderKind,

    /// Hidden renderables keep their uniform setup but skip the draw call
    pub hidden: bool,
}

impl MeshRendererComponent {
    /// Create a visible, non-colliding renderable
    pub fn new(mesh: MeshHandle, material: MaterialHandle) -> Self {
        Self {
            mesh,
            material,
            colliding_type: CollidingType::default(),
            kind: RenderKind::default(),
            hidden: false,
        }
    }

    /// Builder pattern: Set collision response
    pub fn with_colliding_type(mut self, colliding_type: CollidingType) -> Self {
        self.colliding_type = colliding_type;
        self
    }

    /// Builder pattern: Set gameplay role
    pub fn with_kind(mut self, kind: RenderKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder pattern: Start hidden
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Whether collisions against this renderable are evaluated at all
    pub fn collides(&self) -> bool {
        self.colliding_type != CollidingType::Ignore
    }
}

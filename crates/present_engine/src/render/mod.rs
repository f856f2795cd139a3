//! Forward rendering
//!
//! The renderer turns the world into a flat list of render commands each
//! frame, buckets them (opaque, transparent, overlay), sorts the transparent
//! bucket back to front and replays everything through a [`RenderBackend`].
//!
//! GPU work itself is behind the backend trait; assets are registry-owned and
//! referenced by handle.

pub mod assets;
pub mod backend;
pub mod forward_renderer;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod recording;
pub mod render_queue;
pub mod shader;

pub use assets::{AssetRegistry, MaterialHandle, MeshHandle, SamplerHandle, ShaderHandle, TextureHandle};
pub use backend::{BackendResult, ClearFlags, RenderBackend};
pub use forward_renderer::{ForwardRenderer, FrameStats, RenderOutcome};
pub use material::{Material, MaterialKind, PipelineState, TextureBinding, TextureSlot};
pub use mesh::{Mesh, Vertex};
pub use recording::{BackendCall, RecordingBackend};
pub use render_queue::{RenderBucket, RenderCommand, RenderQueue};
pub use shader::UniformValue;

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A renderable referenced a mesh the registry doesn't hold
    #[error("Mesh not found in asset registry: {0:?}")]
    MissingMesh(MeshHandle),

    /// A renderable referenced a material the registry doesn't hold
    #[error("Material not found in asset registry: {0:?}")]
    MissingMaterial(MaterialHandle),

    /// The backend rejected a call
    #[error("Backend error: {0}")]
    Backend(String),
}

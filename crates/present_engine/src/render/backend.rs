//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that rendering backends must implement so the
//! forward renderer can stay API-agnostic. An OpenGL- or Vulkan-backed
//! implementation lives outside the core; [`RecordingBackend`] captures calls
//! for tests and headless runs.
//!
//! [`RecordingBackend`]: super::recording::RecordingBackend

use super::assets::{MeshHandle, SamplerHandle, ShaderHandle, TextureHandle};
use super::material::PipelineState;
use super::mesh::Mesh;
use super::shader::UniformValue;
use super::RenderError;
use crate::foundation::math::{Vec4, Viewport};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

bitflags::bitflags! {
    /// Framebuffer attachments affected by a clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color attachment
        const COLOR = 1 << 0;
        /// Depth attachment
        const DEPTH = 1 << 1;
    }
}

/// Main rendering backend trait
pub trait RenderBackend {
    /// Set the viewport rectangle (pixels, lower-left origin)
    fn set_viewport(&mut self, viewport: Viewport);

    /// Enable or disable color and depth writes
    fn set_write_masks(&mut self, color: bool, depth: bool);

    /// Clear the selected attachments
    fn clear(&mut self, flags: ClearFlags, color: Vec4, depth: f32);

    /// Apply fixed-function pipeline state (culling, depth test, blending)
    fn apply_pipeline_state(&mut self, state: &PipelineState);

    /// Make a shader program current
    fn use_program(&mut self, shader: ShaderHandle) -> BackendResult<()>;

    /// Push a uniform value to the current program
    fn set_uniform(&mut self, shader: ShaderHandle, name: &str, value: UniformValue) -> BackendResult<()>;

    /// Bind a texture (and optional sampler) to a texture unit
    fn bind_texture(&mut self, unit: u32, texture: TextureHandle, sampler: Option<SamplerHandle>) -> BackendResult<()>;

    /// Issue the indexed draw call for a mesh
    fn draw_mesh(&mut self, handle: MeshHandle, mesh: &Mesh) -> BackendResult<()>;
}

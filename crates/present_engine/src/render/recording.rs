//! Call-recording backend
//!
//! Stores every backend call in order instead of talking to a GPU. Used by the
//! headless app and by tests to assert on draw order and uniform values.

use super::assets::{MeshHandle, SamplerHandle, ShaderHandle, TextureHandle};
use super::backend::{BackendResult, ClearFlags, RenderBackend};
use super::material::PipelineState;
use super::mesh::Mesh;
use super::shader::UniformValue;
use crate::foundation::math::{Vec4, Viewport};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// `set_viewport`
    Viewport(Viewport),
    /// `set_write_masks`
    WriteMasks {
        /// Color writes enabled
        color: bool,
        /// Depth writes enabled
        depth: bool,
    },
    /// `clear`
    Clear {
        /// Cleared attachments
        flags: ClearFlags,
        /// Clear color
        color: Vec4,
        /// Clear depth
        depth: f32,
    },
    /// `apply_pipeline_state`
    PipelineState(PipelineState),
    /// `use_program`
    UseProgram(ShaderHandle),
    /// `set_uniform`
    Uniform {
        /// Program receiving the value
        shader: ShaderHandle,
        /// Uniform name
        name: String,
        /// Value
        value: UniformValue,
    },
    /// `bind_texture`
    BindTexture {
        /// Texture unit
        unit: u32,
        /// Bound texture
        texture: TextureHandle,
        /// Bound sampler
        sampler: Option<SamplerHandle>,
    },
    /// `draw_mesh`
    Draw {
        /// Mesh handle
        mesh: MeshHandle,
        /// Indices drawn
        element_count: u32,
    },
}

/// Backend that records calls
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, in order
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Forget recorded calls
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    /// Meshes drawn, in draw order
    pub fn drawn_meshes(&self) -> Vec<MeshHandle> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Draw { mesh, .. } => Some(*mesh),
                _ => None,
            })
            .collect()
    }

    /// Every value pushed to the uniform `name`, in order
    pub fn uniforms_named(&self, name: &str) -> Vec<UniformValue> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Uniform { name: n, value, .. } if n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Last value pushed to the uniform `name`
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms_named(name).last().copied()
    }
}

impl RenderBackend for RecordingBackend {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.calls.push(BackendCall::Viewport(viewport));
    }

    fn set_write_masks(&mut self, color: bool, depth: bool) {
        self.calls.push(BackendCall::WriteMasks { color, depth });
    }

    fn clear(&mut self, flags: ClearFlags, color: Vec4, depth: f32) {
        self.calls.push(BackendCall::Clear { flags, color, depth });
    }

    fn apply_pipeline_state(&mut self, state: &PipelineState) {
        self.calls.push(BackendCall::PipelineState(*state));
    }

    fn use_program(&mut self, shader: ShaderHandle) -> BackendResult<()> {
        self.calls.push(BackendCall::UseProgram(shader));
        Ok(())
    }

    fn set_uniform(&mut self, shader: ShaderHandle, name: &str, value: UniformValue) -> BackendResult<()> {
        self.calls.push(BackendCall::Uniform {
            shader,
            name: name.to_owned(),
            value,
        });
        Ok(())
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle, sampler: Option<SamplerHandle>) -> BackendResult<()> {
        self.calls.push(BackendCall::BindTexture { unit, texture, sampler });
        Ok(())
    }

    fn draw_mesh(&mut self, handle: MeshHandle, mesh: &Mesh) -> BackendResult<()> {
        self.calls.push(BackendCall::Draw {
            mesh: handle,
            element_count: mesh.element_count(),
        });
        Ok(())
    }
}

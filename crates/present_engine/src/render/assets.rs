//! Asset registry
//!
//! Arena tables for meshes, materials, shader programs, textures and samplers.
//! The registry owns every asset; the world only stores handles, so an asset
//! outlives any frame that references it until [`AssetRegistry::clear`] runs
//! at world teardown. Loading and decoding happen elsewhere.

use super::material::Material;
use super::mesh::Mesh;
use slotmap::SlotMap;
use std::collections::HashMap;

slotmap::new_key_type! {
    /// Handle to a registered mesh
    pub struct MeshHandle;
    /// Handle to a registered material
    pub struct MaterialHandle;
    /// Handle to a linked shader program
    pub struct ShaderHandle;
    /// Handle to a 2D texture
    pub struct TextureHandle;
    /// Handle to a sampler object
    pub struct SamplerHandle;
}

/// GPU-side name of a shader program, texture or sampler
///
/// The registry only stores the backend's identifier; creation and
/// destruction of the GPU object are the backend's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuObject(pub u32);

/// Named asset tables
#[derive(Default)]
pub struct AssetRegistry {
    meshes: SlotMap<MeshHandle, Mesh>,
    materials: SlotMap<MaterialHandle, Material>,
    shaders: SlotMap<ShaderHandle, GpuObject>,
    textures: SlotMap<TextureHandle, GpuObject>,
    samplers: SlotMap<SamplerHandle, GpuObject>,
    mesh_names: HashMap<String, MeshHandle>,
    material_names: HashMap<String, MaterialHandle>,
    shader_names: HashMap<String, ShaderHandle>,
    texture_names: HashMap<String, TextureHandle>,
    sampler_names: HashMap<String, SamplerHandle>,
}

macro_rules! asset_table {
    ($insert:ident, $get:ident, $get_mut:ident, $lookup:ident, $table:ident, $names:ident, $handle:ty, $asset:ty) => {
        /// Register an asset under `name`, replacing any previous binding of the name
        pub fn $insert(&mut self, name: impl Into<String>, asset: $asset) -> $handle {
            let handle = self.$table.insert(asset);
            if let Some(old) = self.$names.insert(name.into(), handle) {
                self.$table.remove(old);
            }
            handle
        }

        /// Resolve a handle
        pub fn $get(&self, handle: $handle) -> Option<&$asset> {
            self.$table.get(handle)
        }

        /// Resolve a handle mutably
        pub fn $get_mut(&mut self, handle: $handle) -> Option<&mut $asset> {
            self.$table.get_mut(handle)
        }

        /// Resolve a name
        pub fn $lookup(&self, name: &str) -> Option<$handle> {
            self.$names.get(name).copied()
        }
    };
}

impl AssetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    asset_table!(insert_mesh, mesh, mesh_mut, mesh_handle, meshes, mesh_names, MeshHandle, Mesh);
    asset_table!(insert_material, material, material_mut, material_handle, materials, material_names, MaterialHandle, Material);
    asset_table!(insert_shader, shader, shader_mut, shader_handle, shaders, shader_names, ShaderHandle, GpuObject);
    asset_table!(insert_texture, texture, texture_mut, texture_handle, textures, texture_names, TextureHandle, GpuObject);
    asset_table!(insert_sampler, sampler, sampler_mut, sampler_handle, samplers, sampler_names, SamplerHandle, GpuObject);

    /// Total number of registered assets across all tables
    pub fn len(&self) -> usize {
        self.meshes.len() + self.materials.len() + self.shaders.len() + self.textures.len() + self.samplers.len()
    }

    /// Whether every table is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release every asset; outstanding handles resolve to `None` afterwards
    pub fn clear(&mut self) {
        log::debug!("Releasing {} registered assets", self.len());
        self.meshes.clear();
        self.materials.clear();
        self.shaders.clear();
        self.textures.clear();
        self.samplers.clear();
        self.mesh_names.clear();
        self.material_names.clear();
        self.shader_names.clear();
        self.texture_names.clear();
        self.sampler_names.clear();
    }
}

//! Material system
//!
//! A material is a single record: the shader, fixed-function pipeline state,
//! the bucket flags the renderer sorts by, and a set of optional texture
//! slots. [`MaterialKind`] selects which uniforms and slots `setup` binds.

use super::assets::{SamplerHandle, ShaderHandle, TextureHandle};
use super::backend::{BackendResult, RenderBackend};
use crate::foundation::math::Vec4;
use serde::{Deserialize, Serialize};

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DepthFunction {
    /// Pass when nearer
    #[default]
    Less,
    /// Pass when nearer or equal
    LessEqual,
    /// Always pass
    Always,
}

/// Which triangle faces are culled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CullFace {
    /// Cull back faces
    #[default]
    Back,
    /// Cull front faces
    Front,
    /// Cull both
    FrontAndBack,
}

/// Fixed-function state applied before each draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineState {
    /// Face culling, if enabled
    pub face_culling: Option<CullFace>,
    /// Depth testing, if enabled
    pub depth_testing: Option<DepthFunction>,
    /// Alpha blending (`src_alpha`, `one_minus_src_alpha`)
    pub blending: bool,
    /// Write to the color buffer
    pub color_mask: bool,
    /// Write to the depth buffer
    pub depth_mask: bool,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            face_culling: None,
            depth_testing: None,
            blending: false,
            color_mask: true,
            depth_mask: true,
        }
    }
}

impl PipelineState {
    /// Depth-tested, back-face-culled opaque state
    pub fn opaque() -> Self {
        Self {
            face_culling: Some(CullFace::Back),
            depth_testing: Some(DepthFunction::LessEqual),
            ..Default::default()
        }
    }

    /// Blended state that reads but doesn't write depth
    pub fn transparent() -> Self {
        Self {
            depth_testing: Some(DepthFunction::LessEqual),
            blending: true,
            depth_mask: false,
            ..Default::default()
        }
    }
}

/// Texture slot names understood by the shaders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Single texture of a textured material (`tex`)
    Main,
    /// Lit material albedo (`albedo_tex`)
    Albedo,
    /// Lit material specular (`specular_tex`)
    Specular,
    /// Lit material roughness (`roughness_tex`)
    Roughness,
    /// Lit material ambient occlusion (`ao_tex`)
    AmbientOcclusion,
    /// Lit material emission (`emission_tex`)
    Emission,
}

impl TextureSlot {
    /// Slots bound by a lit material, in texture-unit order
    pub const LIT: [Self; 5] = [Self::Albedo, Self::Specular, Self::Roughness, Self::AmbientOcclusion, Self::Emission];

    /// Sampler uniform name
    pub fn uniform_name(self) -> &'static str {
        match self {
            Self::Main => "tex",
            Self::Albedo => "albedo_tex",
            Self::Specular => "specular_tex",
            Self::Roughness => "roughness_tex",
            Self::AmbientOcclusion => "ao_tex",
            Self::Emission => "emission_tex",
        }
    }
}

/// Texture and sampler bound to one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureBinding {
    /// Texture to sample
    pub texture: TextureHandle,
    /// Sampler state, or the texture's defaults
    pub sampler: Option<SamplerHandle>,
}

/// Which setup path a material takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    /// Pipeline state and shader only
    #[default]
    Basic,
    /// Adds the `tint` uniform
    Tinted,
    /// Adds `tint`, `alphaThreshold` and the main texture on unit 0
    Textured,
    /// Binds the five lit texture slots on units 0-4
    Lit,
}

/// Material record
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Shader program
    pub shader: ShaderHandle,
    /// Fixed-function state
    pub pipeline_state: PipelineState,
    /// Drawn in the back-to-front sorted bucket
    pub transparent: bool,
    /// Drawn last, as a screen overlay (HUD icons)
    pub game_screen_item: bool,
    /// Setup path
    pub kind: MaterialKind,
    /// Tint color (tinted and textured materials)
    pub tint: Vec4,
    /// Fragments with alpha below this are discarded (textured materials)
    pub alpha_threshold: f32,
    main: Option<TextureBinding>,
    lit: [Option<TextureBinding>; 5],
}

impl Material {
    /// Basic material with default pipeline state
    pub fn new(shader: ShaderHandle) -> Self {
        Self {
            shader,
            pipeline_state: PipelineState::default(),
            transparent: false,
            game_screen_item: false,
            kind: MaterialKind::Basic,
            tint: Vec4::new(1.0, 1.0, 1.0, 1.0),
            alpha_threshold: 0.0,
            main: None,
            lit: [None; 5],
        }
    }

    /// Tinted material
    pub fn tinted(shader: ShaderHandle, tint: Vec4) -> Self {
        Self {
            kind: MaterialKind::Tinted,
            tint,
            ..Self::new(shader)
        }
    }

    /// Textured material sampling `binding` in slot [`TextureSlot::Main`]
    pub fn textured(shader: ShaderHandle, binding: TextureBinding, alpha_threshold: f32) -> Self {
        let mut material = Self {
            kind: MaterialKind::Textured,
            alpha_threshold,
            ..Self::new(shader)
        };
        material.set_texture(TextureSlot::Main, Some(binding));
        material
    }

    /// Lit material; fill the slots with [`Material::set_texture`]
    pub fn lit(shader: ShaderHandle) -> Self {
        Self {
            kind: MaterialKind::Lit,
            ..Self::new(shader)
        }
    }

    /// Builder pattern: Set pipeline state
    pub fn with_pipeline_state(mut self, state: PipelineState) -> Self {
        self.pipeline_state = state;
        self
    }

    /// Builder pattern: Mark transparent
    pub fn with_transparency(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Builder pattern: Mark as a screen overlay item
    pub fn with_game_screen_item(mut self, game_screen_item: bool) -> Self {
        self.game_screen_item = game_screen_item;
        self
    }

    /// Binding in a slot
    pub fn texture(&self, slot: TextureSlot) -> Option<TextureBinding> {
        match slot {
            TextureSlot::Main => self.main,
            other => Self::lit_index(other).and_then(|i| self.lit[i]),
        }
    }

    /// Set or clear the binding in a slot
    pub fn set_texture(&mut self, slot: TextureSlot, binding: Option<TextureBinding>) {
        match slot {
            TextureSlot::Main => self.main = binding,
            other => {
                if let Some(i) = Self::lit_index(other) {
                    self.lit[i] = binding;
                }
            }
        }
    }

    fn lit_index(slot: TextureSlot) -> Option<usize> {
        TextureSlot::LIT.iter().position(|s| *s == slot)
    }

    /// Bind pipeline state, shader and the kind-specific uniforms and textures
    ///
    /// Empty texture slots are skipped rather than bound.
    pub fn setup(&self, backend: &mut dyn RenderBackend) -> BackendResult<()> {
        backend.apply_pipeline_state(&self.pipeline_state);
        backend.use_program(self.shader)?;

        match self.kind {
            MaterialKind::Basic => {}
            MaterialKind::Tinted => {
                backend.set_uniform(self.shader, "tint", self.tint.into())?;
            }
            MaterialKind::Textured => {
                backend.set_uniform(self.shader, "tint", self.tint.into())?;
                backend.set_uniform(self.shader, "alphaThreshold", self.alpha_threshold.into())?;
                self.bind_slot(backend, TextureSlot::Main, 0)?;
            }
            MaterialKind::Lit => {
                for (unit, slot) in (0..).zip(TextureSlot::LIT) {
                    self.bind_slot(backend, slot, unit)?;
                }
            }
        }
        Ok(())
    }

    fn bind_slot(&self, backend: &mut dyn RenderBackend, slot: TextureSlot, unit: i32) -> BackendResult<()> {
        if let Some(binding) = self.texture(slot) {
            backend.bind_texture(unit.unsigned_abs(), binding.texture, binding.sampler)?;
            backend.set_uniform(self.shader, slot.uniform_name(), unit.into())?;
        }
        Ok(())
    }
}

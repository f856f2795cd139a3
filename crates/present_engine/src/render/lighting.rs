//! Per-light shader uniforms
//!
//! Lights are sampled once per frame into [`LightUniform`]s; the renderer then
//! pushes them before every draw. Uniform names for `lights[i]` are built once
//! and cached.

use super::backend::{BackendResult, RenderBackend};
use super::assets::ShaderHandle;
use crate::ecs::components::{LightComponent, LightType};
use crate::foundation::math::{transform_direction, transform_point, Mat4, Vec2, Vec3};

/// World-space light data ready for upload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightUniform {
    /// Light position (light world matrix applied to the origin)
    pub position: Vec3,
    /// Light direction (light world matrix applied to local -Y)
    pub direction: Vec3,
    /// RGB color
    pub color: Vec3,
    /// Constant, linear and quadratic attenuation
    pub attenuation: Vec3,
    /// Inner and outer cone angles
    pub cone_angles: Vec2,
    /// Light type
    pub light_type: LightType,
}

impl LightUniform {
    /// Sample a light owned by an entity with `world_matrix`
    pub fn from_component(light: &LightComponent, world_matrix: &Mat4) -> Self {
        Self {
            position: transform_point(world_matrix, Vec3::zeros()),
            direction: transform_direction(world_matrix, Vec3::new(0.0, -1.0, 0.0)),
            color: light.color,
            attenuation: light.attenuation,
            cone_angles: light.cone_angles,
            light_type: light.light_type,
        }
    }
}

/// Uniform names of one `lights[i]` array element
#[derive(Debug, Clone)]
struct LightUniformNames {
    position: String,
    direction: String,
    color: String,
    attenuation: String,
    cone_angles: String,
    light_type: String,
}

impl LightUniformNames {
    fn new(index: usize) -> Self {
        let prefix = format!("lights[{index}]");
        Self {
            position: format!("{prefix}.position"),
            direction: format!("{prefix}.direction"),
            color: format!("{prefix}.color"),
            attenuation: format!("{prefix}.attenuation"),
            cone_angles: format!("{prefix}.cone_angles"),
            light_type: format!("{prefix}.type"),
        }
    }
}

/// Grow-only cache of light uniform names
#[derive(Debug, Default)]
pub struct LightUniformCache {
    names: Vec<LightUniformNames>,
}

impl LightUniformCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `light_count` and every light's uniforms to `shader`
    pub fn upload(&mut self, backend: &mut dyn RenderBackend, shader: ShaderHandle, lights: &[LightUniform]) -> BackendResult<()> {
        while self.names.len() < lights.len() {
            self.names.push(LightUniformNames::new(self.names.len()));
        }

        let count = i32::try_from(lights.len()).unwrap_or(i32::MAX);
        backend.set_uniform(shader, "light_count", count.into())?;
        for (light, names) in lights.iter().zip(&self.names) {
            backend.set_uniform(shader, &names.position, light.position.into())?;
            backend.set_uniform(shader, &names.direction, light.direction.into())?;
            backend.set_uniform(shader, &names.color, light.color.into())?;
            backend.set_uniform(shader, &names.attenuation, light.attenuation.into())?;
            backend.set_uniform(shader, &names.cone_angles, light.cone_angles.into())?;
            backend.set_uniform(shader, &names.light_type, (light.light_type as i32).into())?;
        }
        Ok(())
    }

    /// Number of light slots with cached names
    pub fn cached(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::HALF_PI, Transform};
    use crate::render::recording::RecordingBackend;
    use crate::render::shader::UniformValue;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_samples_world_matrix() {
        let world = Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Vec3::new(HALF_PI, 0.0, 0.0))
            .to_matrix();
        let uniform = LightUniform::from_component(&LightComponent::default(), &world);

        assert_relative_eq!(uniform.position, Vec3::new(1.0, 2.0, 3.0), epsilon = 1e-5);
        // Pitching by +90 degrees turns local -Y into -Z
        assert_relative_eq!(uniform.direction, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_upload_names_and_caches() {
        let lights = [
            LightUniform::from_component(&LightComponent::directional(Vec3::new(1.0, 1.0, 1.0)), &Mat4::identity()),
            LightUniform::from_component(&LightComponent::point(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)), &Mat4::identity()),
        ];
        let mut cache = LightUniformCache::new();
        let mut backend = RecordingBackend::new();

        cache.upload(&mut backend, ShaderHandle::default(), &lights).unwrap();
        cache.upload(&mut backend, ShaderHandle::default(), &lights[..1]).unwrap();

        assert_eq!(cache.cached(), 2);
        assert_eq!(backend.uniforms_named("light_count"), vec![UniformValue::Int(2), UniformValue::Int(1)]);
        assert_eq!(backend.uniform("lights[1].type"), Some(UniformValue::Int(1)));
        assert_eq!(backend.uniform("lights[0].direction"), Some(UniformValue::Vec3(Vec3::new(0.0, -1.0, 0.0))));
    }
}

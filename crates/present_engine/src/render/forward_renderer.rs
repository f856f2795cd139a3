//! Forward renderer
//!
//! Renders one camera per frame: scans the world once for the camera, the
//! lights and every mesh renderer, buckets the resulting commands and replays
//! them through the backend in the order opaque, transparent, overlay.

use super::assets::AssetRegistry;
use super::backend::{ClearFlags, RenderBackend};
use super::lighting::{LightUniform, LightUniformCache};
use super::render_queue::{RenderBucket, RenderCommand, RenderQueue};
use super::RenderError;
use crate::config::RendererConfig;
use crate::ecs::components::{CameraComponent, LightComponent, MeshRendererComponent};
use crate::ecs::World;
use crate::foundation::math::{transform_point, Mat4, Vec3, Viewport};
use log::{debug, trace};

/// Per-frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Commands in the opaque bucket
    pub opaque: usize,
    /// Commands in the transparent bucket
    pub transparent: usize,
    /// Commands in the overlay bucket
    pub overlay: usize,
    /// Draw calls issued
    pub drawn: usize,
    /// Commands set up but skipped because they were hidden
    pub hidden_skipped: usize,
    /// Lights uploaded per command
    pub lights: usize,
}

/// Result of a render call that didn't fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// No camera in the world; nothing was cleared or drawn
    NoCamera,
    /// The viewport has no area; nothing was cleared or drawn
    EmptyViewport,
    /// The frame was drawn
    Rendered(FrameStats),
}

/// Camera state sampled for one frame
struct FrameCamera {
    view_projection: Mat4,
    eye: Vec3,
    forward: Vec3,
}

/// Forward renderer with per-frame buffers reused across frames
pub struct ForwardRenderer {
    config: RendererConfig,
    queue: RenderQueue,
    lights: Vec<LightUniform>,
    light_names: LightUniformCache,
}

impl ForwardRenderer {
    /// Create a renderer
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            queue: RenderQueue::new(),
            lights: Vec::new(),
            light_names: LightUniformCache::new(),
        }
    }

    /// Renderer configuration
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Commands queued by the last frame
    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    /// Render the world into `viewport`
    ///
    /// The first camera in entity order is used. Without a camera the call
    /// returns [`RenderOutcome::NoCamera`] and touches neither the backend
    /// nor the queue. A zero-sized viewport, as seen mid-resize, returns
    /// [`RenderOutcome::EmptyViewport`] the same way.
    pub fn render(
        &mut self,
        world: &World,
        assets: &AssetRegistry,
        backend: &mut dyn RenderBackend,
        viewport: Viewport,
    ) -> Result<RenderOutcome, RenderError> {
        if viewport.is_empty() {
            debug!("Empty viewport {}x{}, skipping render", viewport.width, viewport.height);
            return Ok(RenderOutcome::EmptyViewport);
        }
        let Some(camera) = Self::find_camera(world, viewport) else {
            debug!("No camera in world, skipping render");
            return Ok(RenderOutcome::NoCamera);
        };

        self.collect(world, assets)?;
        self.queue.sort_transparent(camera.forward);

        let mut stats = FrameStats {
            opaque: self.queue.bucket(RenderBucket::Opaque).len(),
            transparent: self.queue.bucket(RenderBucket::Transparent).len(),
            overlay: self.queue.bucket(RenderBucket::Overlay).len(),
            lights: self.lights.len(),
            ..Default::default()
        };

        backend.set_write_masks(true, true);
        backend.clear(ClearFlags::COLOR | ClearFlags::DEPTH, self.config.clear_color(), self.config.clear_depth);
        backend.set_viewport(viewport);

        for bucket in RenderBucket::DRAW_ORDER {
            for command in self.queue.bucket(bucket) {
                Self::draw_command(command, &camera, &self.lights, &mut self.light_names, assets, backend)?;
                if command.hidden {
                    stats.hidden_skipped += 1;
                } else {
                    stats.drawn += 1;
                }
            }
        }

        trace!("Rendered frame: {:?}", stats);
        Ok(RenderOutcome::Rendered(stats))
    }

    fn find_camera(world: &World, viewport: Viewport) -> Option<FrameCamera> {
        let (entity, camera) = world
            .entities()
            .find_map(|e| world.get_component::<CameraComponent>(e).map(|c| (e, c)))?;
        let camera_world = world.local_to_world_matrix(entity);
        Some(FrameCamera {
            view_projection: camera.projection_matrix(viewport) * camera.view_matrix(&camera_world),
            eye: CameraComponent::eye(&camera_world),
            forward: CameraComponent::forward(&camera_world),
        })
    }

    fn collect(&mut self, world: &World, assets: &AssetRegistry) -> Result<(), RenderError> {
        self.queue.clear();
        self.lights.clear();

        for entity in world.entities() {
            if let Some(light) = world.get_component::<LightComponent>(entity) {
                self.lights
                    .push(LightUniform::from_component(light, &world.local_to_world_matrix(entity)));
            }

            if let Some(renderer) = world.get_component::<MeshRendererComponent>(entity) {
                let material = assets
                    .material(renderer.material)
                    .ok_or(RenderError::MissingMaterial(renderer.material))?;
                let local_to_world = world.local_to_world_matrix(entity);
                let command = RenderCommand {
                    entity,
                    local_to_world,
                    center: transform_point(&local_to_world, Vec3::zeros()),
                    mesh: renderer.mesh,
                    material: renderer.material,
                    hidden: renderer.hidden,
                };
                self.queue
                    .push(RenderBucket::classify(material.transparent, material.game_screen_item), command);
            }
        }
        Ok(())
    }

    fn draw_command(
        command: &RenderCommand,
        camera: &FrameCamera,
        lights: &[LightUniform],
        light_names: &mut LightUniformCache,
        assets: &AssetRegistry,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError> {
        let material = assets
            .material(command.material)
            .ok_or(RenderError::MissingMaterial(command.material))?;
        let mesh = assets.mesh(command.mesh).ok_or(RenderError::MissingMesh(command.mesh))?;

        material.setup(backend)?;

        let shader = material.shader;
        let model = command.local_to_world;
        let model_inverse_transpose = model.try_inverse().unwrap_or_else(Mat4::identity).transpose();
        backend.set_uniform(shader, "transform", (camera.view_projection * model).into())?;
        backend.set_uniform(shader, "M", model.into())?;
        backend.set_uniform(shader, "M_IT", model_inverse_transpose.into())?;
        backend.set_uniform(shader, "vp", camera.view_projection.into())?;
        backend.set_uniform(shader, "eye", camera.eye.into())?;
        light_names.upload(backend, shader, lights)?;

        if !command.hidden {
            backend.draw_mesh(command.mesh, mesh)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::render::assets::{GpuObject, MaterialHandle, MeshHandle};
    use crate::render::material::Material;
    use crate::render::mesh::Mesh;
    use crate::render::recording::{BackendCall, RecordingBackend};
    use crate::render::shader::UniformValue;

    struct Scene {
        world: World,
        assets: AssetRegistry,
        opaque: MaterialHandle,
        transparent: MaterialHandle,
        overlay: MaterialHandle,
    }

    impl Scene {
        fn new() -> Self {
            let mut assets = AssetRegistry::new();
            let shader = assets.insert_shader("basic", GpuObject(1));
            let opaque = assets.insert_material("opaque", Material::new(shader));
            let transparent = assets.insert_material("glass", Material::new(shader).with_transparency(true));
            let overlay = assets.insert_material("icon", Material::new(shader).with_game_screen_item(true));
            Self {
                world: World::new(),
                assets,
                opaque,
                transparent,
                overlay,
            }
        }

        fn add_camera(&mut self) {
            let camera = self.world.create_entity();
            self.world.add_component(camera, CameraComponent::default());
        }

        fn add_renderable(&mut self, name: &str, material: MaterialHandle, position: Vec3) -> MeshHandle {
            let mesh = self
                .assets
                .insert_mesh(name, Mesh::with_bounds(Vec3::repeat(-0.5), Vec3::repeat(0.5), 36));
            let entity = self.world.create_entity();
            self.world.set_local_transform(entity, Transform::from_position(position));
            self.world.add_component(entity, MeshRendererComponent::new(mesh, material));
            mesh
        }

        fn render(&mut self, backend: &mut RecordingBackend) -> Result<RenderOutcome, RenderError> {
            self.render_into(backend, Viewport::from_size(800, 600))
        }

        fn render_into(
            &mut self,
            backend: &mut RecordingBackend,
            viewport: Viewport,
        ) -> Result<RenderOutcome, RenderError> {
            let mut renderer = ForwardRenderer::new(RendererConfig::default());
            renderer.render(&self.world, &self.assets, backend, viewport)
        }
    }

    #[test]
    fn test_no_camera_is_a_noop() {
        let mut scene = Scene::new();
        let opaque = scene.opaque;
        scene.add_renderable("cube", opaque, Vec3::zeros());

        let mut backend = RecordingBackend::new();
        assert_eq!(scene.render(&mut backend), Ok(RenderOutcome::NoCamera));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_zero_sized_viewport_is_skipped() {
        let mut scene = Scene::new();
        scene.add_camera();
        let opaque = scene.opaque;
        scene.add_renderable("cube", opaque, Vec3::zeros());

        let mut backend = RecordingBackend::new();
        assert_eq!(
            scene.render_into(&mut backend, Viewport::new(0, 0, 0, 720)),
            Ok(RenderOutcome::EmptyViewport)
        );
        assert_eq!(
            scene.render_into(&mut backend, Viewport::new(0, 0, 1280, 0)),
            Ok(RenderOutcome::EmptyViewport)
        );
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_buckets_drawn_in_order() {
        let mut scene = Scene::new();
        scene.add_camera();
        let (opaque, transparent, overlay) = (scene.opaque, scene.transparent, scene.overlay);
        let icon = scene.add_renderable("icon", overlay, Vec3::zeros());
        let near_glass = scene.add_renderable("near_glass", transparent, Vec3::new(0.0, 0.0, -2.0));
        let far_glass = scene.add_renderable("far_glass", transparent, Vec3::new(0.0, 0.0, -8.0));
        let wall = scene.add_renderable("wall", opaque, Vec3::new(0.0, 0.0, -5.0));

        let mut backend = RecordingBackend::new();
        let outcome = scene.render(&mut backend).unwrap();

        assert_eq!(backend.drawn_meshes(), vec![wall, far_glass, near_glass, icon]);
        assert_eq!(
            outcome,
            RenderOutcome::Rendered(FrameStats {
                opaque: 1,
                transparent: 2,
                overlay: 1,
                drawn: 4,
                hidden_skipped: 0,
                lights: 0,
            })
        );
    }

    #[test]
    fn test_clear_and_viewport_precede_draws() {
        let mut scene = Scene::new();
        scene.add_camera();
        let opaque = scene.opaque;
        scene.add_renderable("cube", opaque, Vec3::zeros());

        let mut backend = RecordingBackend::new();
        scene.render(&mut backend).unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0], BackendCall::WriteMasks { color: true, depth: true });
        assert!(matches!(calls[1], BackendCall::Clear { flags, .. } if flags == ClearFlags::COLOR | ClearFlags::DEPTH));
        assert_eq!(calls[2], BackendCall::Viewport(Viewport::from_size(800, 600)));
    }

    #[test]
    fn test_hidden_command_gets_uniforms_but_no_draw() {
        let mut scene = Scene::new();
        scene.add_camera();
        let light = scene.world.create_entity();
        scene.world.add_component(light, LightComponent::default());
        let opaque = scene.opaque;
        scene.add_renderable("visible", opaque, Vec3::zeros());
        let hidden_mesh = scene.add_renderable("hidden", opaque, Vec3::zeros());
        let hidden_entity = scene.world.entities().last().unwrap();
        scene
            .world
            .get_component_mut::<MeshRendererComponent>(hidden_entity)
            .unwrap()
            .hidden = true;

        let mut backend = RecordingBackend::new();
        let outcome = scene.render(&mut backend).unwrap();

        assert!(!backend.drawn_meshes().contains(&hidden_mesh));
        assert_eq!(backend.uniforms_named("transform").len(), 2);
        assert_eq!(backend.uniforms_named("light_count"), vec![UniformValue::Int(1); 2]);
        match outcome {
            RenderOutcome::Rendered(stats) => {
                assert_eq!(stats.drawn, 1);
                assert_eq!(stats.hidden_skipped, 1);
                assert_eq!(stats.lights, 1);
            }
            other => panic!("expected a rendered frame, got {other:?}"),
        }
    }

    #[test]
    fn test_model_uniforms_match_world_matrix() {
        let mut scene = Scene::new();
        scene.add_camera();
        let opaque = scene.opaque;
        scene.add_renderable("cube", opaque, Vec3::new(1.0, 2.0, 3.0));

        let mut backend = RecordingBackend::new();
        scene.render(&mut backend).unwrap();

        let model = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).to_matrix();
        assert_eq!(backend.uniform("M"), Some(UniformValue::Mat4(model)));
        assert_eq!(backend.uniform("eye"), Some(UniformValue::Vec3(Vec3::zeros())));
    }

    #[test]
    fn test_missing_material_is_an_error() {
        let mut scene = Scene::new();
        scene.add_camera();
        let shader = scene.assets.shader_handle("basic").unwrap();
        let stale = scene.assets.insert_material("rebound", Material::new(shader));
        // Rebinding the name releases the first material
        scene.assets.insert_material("rebound", Material::new(shader));
        scene.add_renderable("cube", stale, Vec3::zeros());

        let mut backend = RecordingBackend::new();
        assert_eq!(scene.render(&mut backend), Err(RenderError::MissingMaterial(stale)));
    }
}

//! Headless demo driver
//!
//! Builds a small level in code, walks the player forward through it and
//! replays every frame against a recording backend until the game is won,
//! lost or the frame cap is hit.
//!
//! Usage: `present_app [config.toml|config.ron] [effective.toml|effective.ron]`.
//! The first file overrides the engine configuration; the second, if given,
//! receives the configuration the run actually uses.

use present_engine::foundation::logging;
use present_engine::prelude::*;
use present_engine::render::assets::GpuObject;
use present_engine::render::{MaterialHandle, MeshHandle, TextureBinding, TextureSlot};

const FRAME_CAP: u64 = 60 * 60;
const DELTA_TIME: f32 = 1.0 / 60.0;

struct PresentApp {
    world: World,
    assets: AssetRegistry,
    game: Game,
    scheduler: FrameScheduler,
    backend: RecordingBackend,
    viewport: Viewport,
}

/// Asset handles the level is built from
struct LevelAssets {
    cube: MeshHandle,
    plane: MeshHandle,
    icon: MeshHandle,
    ground: MaterialHandle,
    wall: MaterialHandle,
    present: MaterialHandle,
    enemy: MaterialHandle,
    hud: MaterialHandle,
}

impl PresentApp {
    fn new(config: &CoreConfig) -> Self {
        let mut app = Self {
            world: World::new(),
            assets: AssetRegistry::new(),
            game: Game::new(config.game),
            scheduler: FrameScheduler::new(config),
            backend: RecordingBackend::new(),
            viewport: Viewport::from_size(1280, 720),
        };
        let handles = app.register_assets();
        app.populate(&handles, config.game.presents_goal);
        log::info!(
            "Level ready: {} entities, {} assets",
            app.world.len(),
            app.assets.len()
        );
        app
    }

    fn register_assets(&mut self) -> LevelAssets {
        let assets = &mut self.assets;
        let basic = assets.insert_shader("basic", GpuObject(1));
        let textured = assets.insert_shader("textured", GpuObject(2));
        let lit = assets.insert_shader("lit", GpuObject(3));
        let sampler = assets.insert_sampler("linear", GpuObject(10));
        let snow = assets.insert_texture("snow", GpuObject(20));
        let gift = assets.insert_texture("gift", GpuObject(21));
        let heart = assets.insert_texture("heart", GpuObject(22));

        let mut ground = Material::lit(lit).with_pipeline_state(PipelineState::opaque());
        ground.set_texture(
            TextureSlot::Albedo,
            Some(TextureBinding {
                texture: snow,
                sampler: Some(sampler),
            }),
        );
        let hud = Material::textured(
            textured,
            TextureBinding {
                texture: heart,
                sampler: Some(sampler),
            },
            0.1,
        )
        .with_pipeline_state(PipelineState::transparent())
        .with_game_screen_item(true);
        let present = Material::textured(
            textured,
            TextureBinding {
                texture: gift,
                sampler: Some(sampler),
            },
            0.5,
        )
        .with_pipeline_state(PipelineState::opaque());

        LevelAssets {
            cube: assets.insert_mesh("cube", Mesh::with_bounds(Vec3::repeat(-1.0), Vec3::repeat(1.0), 36)),
            plane: assets.insert_mesh("plane", Mesh::with_bounds(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0), 6)),
            icon: assets.insert_mesh("icon", Mesh::with_bounds(Vec3::new(-0.5, -0.5, 0.0), Vec3::new(0.5, 0.5, 0.0), 6)),
            ground: assets.insert_material("ground", ground),
            wall: assets.insert_material(
                "wall",
                Material::tinted(basic, Vec4::new(0.6, 0.6, 0.7, 1.0)).with_pipeline_state(PipelineState::opaque()),
            ),
            present: assets.insert_material("present", present),
            enemy: assets.insert_material(
                "enemy",
                Material::tinted(basic, Vec4::new(0.9, 0.1, 0.1, 0.6))
                    .with_pipeline_state(PipelineState::transparent())
                    .with_transparency(true),
            ),
            hud: assets.insert_material("hud", hud),
        }
    }

    fn populate(&mut self, handles: &LevelAssets, presents_goal: i32) {
        let world = &mut self.world;

        let camera = world.create_entity();
        world.set_name(camera, "camera");
        world.set_local_transform(camera, Transform::from_position(Vec3::new(0.0, 1.0, 0.0)));
        world.add_component(camera, CameraComponent::default());
        world.add_component(camera, FreeCameraControllerComponent::default());

        let player = world.create_child(camera);
        world.set_name(player, "player");
        world.set_local_transform(
            player,
            Transform::from_position(Vec3::new(0.0, -0.5, -1.5)).with_uniform_scale(0.3),
        );
        world.add_component(player, MeshRendererComponent::new(handles.cube, handles.wall));

        // HUD icons hang in front of the camera
        for i in 0..self.game.hearts() {
            let icon = world.create_child(camera);
            world.set_local_transform(
                icon,
                Transform::from_position(Vec3::new(-0.9 + 0.12 * i as f32, 0.5, -1.0)).with_uniform_scale(0.1),
            );
            world.add_component(
                icon,
                MeshRendererComponent::new(handles.icon, handles.hud).with_kind(RenderKind::Heart),
            );
        }
        for i in 0..presents_goal {
            let icon = world.create_child(camera);
            world.set_local_transform(
                icon,
                Transform::from_position(Vec3::new(0.9 - 0.12 * i as f32, 0.5, -1.0)).with_uniform_scale(0.1),
            );
            world.add_component(
                icon,
                MeshRendererComponent::new(handles.icon, handles.hud)
                    .with_kind(RenderKind::Present)
                    .hidden(),
            );
        }

        let ground = world.create_entity();
        world.set_local_transform(ground, Transform::identity().with_scale(Vec3::new(30.0, 1.0, 60.0)));
        world.add_component(ground, MeshRendererComponent::new(handles.plane, handles.ground));

        for (x, z, sx, sz) in [(0.0, -60.0, 30.0, 1.0), (-30.0, -30.0, 1.0, 30.0), (30.0, -30.0, 1.0, 30.0)] {
            let wall = world.create_entity();
            world.set_local_transform(
                wall,
                Transform::from_position(Vec3::new(x, 2.0, z)).with_scale(Vec3::new(sx, 2.0, sz)),
            );
            world.add_component(
                wall,
                MeshRendererComponent::new(handles.cube, handles.wall).with_colliding_type(CollidingType::Boundary),
            );
        }

        for i in 0..presents_goal {
            let present = world.create_entity();
            world.set_local_transform(
                present,
                Transform::from_position(Vec3::new(0.0, 0.5, -6.0 - 8.0 * i as f32)).with_uniform_scale(0.5),
            );
            world.add_component(present, MovementComponent::spinning(Vec3::new(0.0, 1.0, 0.0)));
            world.add_component(
                present,
                MeshRendererComponent::new(handles.cube, handles.present).with_colliding_type(CollidingType::Collectable),
            );
        }

        let enemy = world.create_entity();
        world.set_name(enemy, "enemy");
        world.set_local_transform(enemy, Transform::from_position(Vec3::new(10.0, 1.0, -20.0)));
        world.add_component(
            enemy,
            RandomMovementComponent::new(Vec3::new(3.0, 0.0, 3.0), Vec3::new(-28.0, 0.0, -58.0), Vec3::new(28.0, 0.0, -2.0)),
        );
        world.add_component(
            enemy,
            MeshRendererComponent::new(handles.cube, handles.enemy).with_colliding_type(CollidingType::Avoidable),
        );

        let sun = world.create_entity();
        world.set_local_transform(sun, Transform::identity().with_rotation(Vec3::new(-0.6, 0.3, 0.0)));
        world.add_component(sun, LightComponent::directional(Vec3::new(1.0, 0.95, 0.9)));

        let lamp = world.create_entity();
        world.set_local_transform(lamp, Transform::from_position(Vec3::new(0.0, 4.0, -30.0)));
        world.add_component(lamp, LightComponent::point(Vec3::new(1.0, 0.6, 0.3), Vec3::new(1.0, 0.1, 0.02)));
    }

    fn run(&mut self) -> Result<GameState, RenderError> {
        self.scheduler.set_input(ControllerInput {
            forward: true,
            ..Default::default()
        });

        while self.scheduler.clock().frame_count() < FRAME_CAP {
            self.backend.reset();
            let report = self.scheduler.run_frame(
                &mut self.world,
                &self.assets,
                &mut self.game,
                &mut self.backend,
                self.viewport,
                DELTA_TIME,
            )?;

            if let RenderOutcome::Rendered(stats) = report.render {
                log::trace!("Frame {}: {:?}", self.scheduler.clock().frame_count(), stats);
            }
            if report.state.is_finished() {
                break;
            }
        }
        Ok(self.game.state())
    }
}

fn load_config(path: Option<&str>) -> Result<CoreConfig, ConfigError> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            CoreConfig::load_from_file(path)
        }
        None => Ok(CoreConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    log::info!("Starting present collector");
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    if let Some(dump_path) = args.get(1) {
        config.save_to_file(dump_path)?;
        log::info!("Wrote effective configuration to {}", dump_path);
    }
    let mut app = PresentApp::new(&config);
    let state = app.run()?;

    let clock = app.scheduler.clock();
    log::info!(
        "Finished after {} frames ({:.1}s simulated): {:?}, hearts {}, presents {}/{}",
        clock.frame_count(),
        clock.total_time(),
        state,
        app.game.hearts(),
        app.game.presents(),
        app.game.presents_goal()
    );
    Ok(())
}

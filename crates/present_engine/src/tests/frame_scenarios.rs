//! Whole-frame scenarios run through the scheduler

use crate::config::CoreConfig;
use crate::ecs::components::{
    CameraComponent, CollidingType, FreeCameraControllerComponent, LightComponent, MeshRendererComponent,
    RenderKind,
};
use crate::ecs::systems::{CollisionEffect, CollisionOutcome, ControllerInput};
use crate::ecs::{Entity, FrameScheduler, World};
use crate::foundation::logging;
use crate::foundation::math::{Transform, Vec3, Viewport};
use crate::game::{Game, GameState};
use crate::render::assets::GpuObject;
use crate::render::{AssetRegistry, Material, MaterialHandle, Mesh, MeshHandle, RecordingBackend, RenderOutcome};

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    struct Level {
        world: World,
        assets: AssetRegistry,
        cube: MeshHandle,
        player_mesh: MeshHandle,
        opaque: MaterialHandle,
        overlay: MaterialHandle,
        camera: Entity,
        player: Entity,
    }

    impl Level {
        fn new() -> Self {
            logging::try_init();
            let mut assets = AssetRegistry::new();
            let shader = assets.insert_shader("lit", GpuObject(1));
            let opaque = assets.insert_material("opaque", Material::new(shader));
            let overlay = assets.insert_material("hud", Material::new(shader).with_game_screen_item(true));
            let cube = assets.insert_mesh("cube", Mesh::with_bounds(Vec3::repeat(-1.0), Vec3::repeat(1.0), 36));
            let player_mesh = assets.insert_mesh("player", Mesh::with_bounds(Vec3::repeat(-0.25), Vec3::repeat(0.25), 36));

            let mut world = World::new();
            let camera = world.create_entity();
            world.set_name(camera, "camera");
            world.add_component(camera, CameraComponent::default());
            world.add_component(camera, FreeCameraControllerComponent::default());
            let player = world.create_child(camera);
            world.set_local_transform(player, Transform::from_position(Vec3::new(0.0, 0.0, -1.0)));
            world.add_component(player, MeshRendererComponent::new(player_mesh, opaque));

            let sun = world.create_entity();
            world.add_component(sun, LightComponent::default());

            Self {
                world,
                assets,
                cube,
                player_mesh,
                opaque,
                overlay,
                camera,
                player,
            }
        }

        fn spawn(&mut self, colliding_type: CollidingType, position: Vec3) -> Entity {
            let entity = self.world.create_entity();
            self.world.set_local_transform(entity, Transform::from_position(position));
            self.world.add_component(
                entity,
                MeshRendererComponent::new(self.cube, self.opaque).with_colliding_type(colliding_type),
            );
            entity
        }

        fn icon(&mut self, kind: RenderKind, hidden: bool) -> Entity {
            let entity = self.world.create_entity();
            let mut renderer = MeshRendererComponent::new(self.player_mesh, self.overlay).with_kind(kind);
            renderer.hidden = hidden;
            self.world.add_component(entity, renderer);
            entity
        }
    }

    fn walk_forward(scheduler: &mut FrameScheduler) {
        scheduler.set_input(ControllerInput {
            forward: true,
            ..Default::default()
        });
    }

    #[test]
    fn test_player_follows_camera_in_world_space() {
        let mut level = Level::new();
        let config = CoreConfig::default();
        let mut scheduler = FrameScheduler::new(&config);
        let mut game = Game::new(config.game);
        let mut backend = RecordingBackend::new();
        walk_forward(&mut scheduler);

        for _ in 0..60 {
            scheduler
                .run_frame(&mut level.world, &level.assets, &mut game, &mut backend, Viewport::from_size(800, 600), DT)
                .unwrap();
        }

        let camera_z = level.world.local_transform(level.camera).unwrap().position.z;
        assert!((camera_z + 3.0).abs() < 1e-3, "camera at z = {camera_z}");
        let player_world = level.world.local_to_world_matrix(level.player);
        assert!((player_world[(2, 3)] - (camera_z - 1.0)).abs() < 1e-4);
    }

    #[test]
    fn test_collecting_every_present_wins() {
        let mut level = Level::new();
        for i in 0..3u8 {
            level.spawn(CollidingType::Collectable, Vec3::new(0.0, 0.0, -3.0 - 3.0 * f32::from(i)));
            level.icon(RenderKind::Present, true);
        }
        let mut config = CoreConfig::default();
        config.game.presents_goal = 3;
        let mut scheduler = FrameScheduler::new(&config);
        let mut game = Game::new(config.game);
        let mut backend = RecordingBackend::new();
        walk_forward(&mut scheduler);

        let mut frames = 0;
        while game.state() == GameState::Playing && frames < 600 {
            scheduler
                .run_frame(&mut level.world, &level.assets, &mut game, &mut backend, Viewport::from_size(800, 600), DT)
                .unwrap();
            frames += 1;
        }

        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.presents(), 3);
        let visible_icons = level
            .world
            .query::<MeshRendererComponent>()
            .into_iter()
            .filter(|(_, r)| r.kind == RenderKind::Present && !r.hidden)
            .count();
        assert_eq!(visible_icons, 3);
    }

    #[test]
    fn test_wall_stops_the_camera() {
        let mut level = Level::new();
        level.spawn(CollidingType::Boundary, Vec3::new(0.0, 0.0, -6.0));
        let config = CoreConfig::default();
        let mut scheduler = FrameScheduler::new(&config);
        let mut game = Game::new(config.game);
        let mut backend = RecordingBackend::new();
        walk_forward(&mut scheduler);

        let mut rolled_back = false;
        for _ in 0..240 {
            scheduler
                .run_frame(&mut level.world, &level.assets, &mut game, &mut backend, Viewport::from_size(800, 600), DT)
                .unwrap();
            rolled_back |= scheduler
                .collider()
                .events()
                .iter()
                .any(|e| e.effect == CollisionEffect::RolledBack);
        }

        assert!(rolled_back);
        // Player box front face never passes the wall's near face at z = -5
        let camera_z = level.world.local_transform(level.camera).unwrap().position.z;
        assert!(camera_z > -4.0, "camera went through the wall: z = {camera_z}");
    }

    #[test]
    fn test_hazard_loses_game_across_cooldowns() {
        let mut level = Level::new();
        // The player stands inside the hazard for the whole run
        level.spawn(CollidingType::Avoidable, Vec3::new(0.0, 0.0, -1.0));
        for _ in 0..3 {
            level.icon(RenderKind::Heart, false);
        }
        let mut config = CoreConfig::default();
        config.collision.recovery_cooldown = 1.0;
        let mut scheduler = FrameScheduler::new(&config);
        let mut game = Game::new(config.game);
        let mut backend = RecordingBackend::new();

        let mut frames = 0;
        while game.state() == GameState::Playing && frames < 1000 {
            scheduler
                .run_frame(&mut level.world, &level.assets, &mut game, &mut backend, Viewport::from_size(800, 600), DT)
                .unwrap();
            frames += 1;
        }

        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.hearts(), 0);
        // First hit is immediate, the next two each wait out a one second cooldown
        assert!((115..=125).contains(&frames), "lost after {frames} frames");
        let hidden_hearts = level
            .world
            .query::<MeshRendererComponent>()
            .into_iter()
            .filter(|(_, r)| r.kind == RenderKind::Heart && r.hidden)
            .count();
        assert_eq!(hidden_hearts, 3);
    }

    #[test]
    fn test_frame_draws_scene_and_overlay_last() {
        let mut level = Level::new();
        level.spawn(CollidingType::Ignore, Vec3::new(0.0, 0.0, -10.0));
        level.icon(RenderKind::Heart, false);
        let config = CoreConfig::default();
        let mut scheduler = FrameScheduler::new(&config);
        let mut game = Game::new(config.game);
        let mut backend = RecordingBackend::new();

        let report = scheduler
            .run_frame(&mut level.world, &level.assets, &mut game, &mut backend, Viewport::from_size(800, 600), DT)
            .unwrap();

        assert_eq!(report.collision, CollisionOutcome::Checked { tested: 0, events: 0 });
        match report.render {
            RenderOutcome::Rendered(stats) => {
                assert_eq!(stats.opaque, 2);
                assert_eq!(stats.overlay, 1);
                assert_eq!(stats.lights, 1);
                assert_eq!(stats.drawn, 3);
            }
            other => panic!("level has a camera, got {other:?}"),
        }
        assert_eq!(backend.drawn_meshes().last(), Some(&level.player_mesh));
    }
}

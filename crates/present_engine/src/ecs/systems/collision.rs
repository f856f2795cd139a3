//! Collision and game-state engine
//!
//! Tests the main character's box against every other mesh renderer each
//! frame and applies the response its [`CollidingType`] asks for:
//!
//! - **Boundary**: roll the camera back to the transform recorded for that
//!   boundary, or record a slightly nudged safe transform when clear of it.
//! - **Collectable**: hide it, count a present and reveal a present icon.
//! - **Avoidable**: cost a heart and hide a heart icon, at most once per
//!   recovery cooldown.
//!
//! The main character is the mesh renderer whose parent carries both a camera
//! and a free camera controller. Discovery runs until it succeeds and is then
//! cached for as long as the entities live.

use crate::config::CollisionConfig;
use crate::ecs::components::{
    CameraComponent, CollidingType, FreeCameraControllerComponent, MeshRendererComponent, RenderKind,
};
use crate::ecs::{Entity, World};
use crate::foundation::math::utils;
use crate::foundation::time::Cooldown;
use crate::game::Game;
use crate::physics::Aabb;
use crate::render::AssetRegistry;
use log::{debug, warn};

/// What a collision did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEffect {
    /// The camera was restored to the boundary's recorded transform
    RolledBack,
    /// A present was collected
    Collected,
    /// A heart was lost
    Hit,
    /// An avoidable was touched during the recovery cooldown
    Recovering,
}

/// One collision response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    /// Entity the main character touched
    pub entity: Entity,
    /// Response applied
    pub effect: CollisionEffect,
}

/// Result of a collision update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// No camera rig with a main character was found; nothing was tested
    NoMainCharacter,
    /// The main character was tested against the scene
    Checked {
        /// Colliding renderables tested
        tested: usize,
        /// Responses applied (see [`ColliderSystem::events`])
        events: usize,
    },
}

/// Player rig found by discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rig {
    camera: Entity,
    main_character: Entity,
}

/// Collision system
pub struct ColliderSystem {
    config: CollisionConfig,
    rig: Option<Rig>,
    /// Visible heart icons; the last one is hidden on the next hit
    heart_icons: Vec<Entity>,
    /// Hidden present icons; the last one is revealed on the next collect
    pending_present_icons: Vec<Entity>,
    recovery: Cooldown,
    events: Vec<CollisionEvent>,
}

impl ColliderSystem {
    /// Create the system
    pub fn new(config: CollisionConfig) -> Self {
        Self {
            recovery: Cooldown::new(config.recovery_cooldown),
            config,
            rig: None,
            heart_icons: Vec::new(),
            pending_present_icons: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Responses applied by the last update
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Main character found by discovery, if any
    pub fn main_character(&self) -> Option<Entity> {
        self.rig.map(|rig| rig.main_character)
    }

    /// Camera entity owning the main character, if any
    pub fn camera(&self) -> Option<Entity> {
        self.rig.map(|rig| rig.camera)
    }

    /// Seconds until an avoidable can cost another heart
    pub fn recovery_remaining(&self) -> f32 {
        self.recovery.remaining()
    }

    /// Forget the discovered rig and icons and make the cooldown ready
    ///
    /// Call after repopulating the world.
    pub fn reset(&mut self) {
        self.rig = None;
        self.heart_icons.clear();
        self.pending_present_icons.clear();
        self.recovery.reset();
        self.events.clear();
    }

    /// Run one frame of collision handling
    pub fn update(&mut self, world: &mut World, assets: &AssetRegistry, delta_time: f32, game: &mut Game) -> CollisionOutcome {
        self.events.clear();
        self.recovery.tick(delta_time);

        let Some(rig) = self.discover(world) else {
            return CollisionOutcome::NoMainCharacter;
        };
        let Some(mut main_box) = Self::world_box(world, assets, rig.main_character) else {
            warn!("Main character mesh is not in the asset registry");
            return CollisionOutcome::NoMainCharacter;
        };

        let candidates: Vec<(Entity, CollidingType)> = world
            .query::<MeshRendererComponent>()
            .into_iter()
            .filter(|(entity, renderer)| *entity != rig.main_character && renderer.collides())
            .map(|(entity, renderer)| (entity, renderer.colliding_type))
            .collect();

        let mut tested = 0;
        for (entity, colliding_type) in candidates {
            let Some(other) = Self::world_box(world, assets, entity) else {
                warn!("Skipping collider {:?}: mesh is not in the asset registry", entity);
                continue;
            };
            tested += 1;
            let overlapping = main_box.overlaps(&other);

            match colliding_type {
                CollidingType::Boundary => {
                    if overlapping {
                        self.roll_back(world, rig.camera, entity);
                        // The rig moved; later tests use the restored box
                        if let Some(restored) = Self::world_box(world, assets, rig.main_character) {
                            main_box = restored;
                        }
                    } else {
                        self.record_safe_transform(world, rig.camera, entity);
                    }
                }
                CollidingType::Collectable if overlapping => self.collect(world, entity, game),
                CollidingType::Avoidable if overlapping => self.hit(world, entity, game),
                _ => {}
            }
        }

        CollisionOutcome::Checked {
            tested,
            events: self.events.len(),
        }
    }

    fn discover(&mut self, world: &World) -> Option<Rig> {
        if let Some(rig) = self.rig {
            if world.contains(rig.camera) && world.contains(rig.main_character) {
                return Some(rig);
            }
            debug!("Cached main character is gone, rediscovering");
            self.reset();
        }

        let rig = world.query::<MeshRendererComponent>().into_iter().find_map(|(entity, renderer)| {
            let camera = world.parent(entity)?;
            let is_rig = renderer.kind == RenderKind::Main
                && world.has_component::<CameraComponent>(camera)
                && world.has_component::<FreeCameraControllerComponent>(camera);
            is_rig.then_some(Rig {
                camera,
                main_character: entity,
            })
        })?;

        for (entity, renderer) in world.query::<MeshRendererComponent>() {
            match renderer.kind {
                RenderKind::Heart if !renderer.hidden => self.heart_icons.push(entity),
                RenderKind::Present if renderer.hidden => self.pending_present_icons.push(entity),
                _ => {}
            }
        }

        debug!(
            "Found main character {:?} under camera {:?} ({} heart icons, {} present icons)",
            rig.main_character,
            rig.camera,
            self.heart_icons.len(),
            self.pending_present_icons.len()
        );
        self.rig = Some(rig);
        Some(rig)
    }

    fn world_box(world: &World, assets: &AssetRegistry, entity: Entity) -> Option<Aabb> {
        let renderer = world.get_component::<MeshRendererComponent>(entity)?;
        let mesh = assets.mesh(renderer.mesh)?;
        let local = Aabb {
            min: mesh.bounding_box_min(),
            max: mesh.bounding_box_max(),
        };
        Some(local.transformed(&world.local_to_world_matrix(entity)))
    }

    fn roll_back(&mut self, world: &mut World, camera: Entity, boundary: Entity) {
        let Some(safe) = world.last_non_collided_transform(boundary).copied() else {
            debug!("Boundary {:?} hit before a safe transform was recorded, camera kept", boundary);
            return;
        };
        world.set_local_transform(camera, safe);
        debug!("Boundary {:?} hit, camera rolled back", boundary);
        self.events.push(CollisionEvent {
            entity: boundary,
            effect: CollisionEffect::RolledBack,
        });
    }

    fn record_safe_transform(&self, world: &mut World, camera: Entity, boundary: Entity) {
        let Some(mut safe) = world.local_transform(camera).copied() else {
            return;
        };
        let nudge = self.config.boundary_nudge;
        safe.position.x -= nudge * utils::sign(safe.position.x);
        safe.position.z -= nudge * utils::sign(safe.position.z);
        world.set_last_non_collided_transform(boundary, safe);
    }

    fn collect(&mut self, world: &mut World, entity: Entity, game: &mut Game) {
        let Some(renderer) = world.get_component_mut::<MeshRendererComponent>(entity) else {
            return;
        };
        if renderer.hidden {
            return;
        }
        renderer.hidden = true;
        game.increment_presents();
        if let Some(icon) = self.pending_present_icons.pop() {
            set_hidden(world, icon, false);
        }
        debug!("Collected present {:?}", entity);
        self.events.push(CollisionEvent {
            entity,
            effect: CollisionEffect::Collected,
        });
    }

    fn hit(&mut self, world: &mut World, entity: Entity, game: &mut Game) {
        if !self.recovery.try_trigger() {
            self.events.push(CollisionEvent {
                entity,
                effect: CollisionEffect::Recovering,
            });
            return;
        }
        game.decrement_hearts();
        if let Some(icon) = self.heart_icons.pop() {
            set_hidden(world, icon, true);
        }
        debug!("Hit by {:?}, recovering for {}s", entity, self.recovery.duration());
        self.events.push(CollisionEvent {
            entity,
            effect: CollisionEffect::Hit,
        });
    }
}

fn set_hidden(world: &mut World, entity: Entity, hidden: bool) {
    if let Some(renderer) = world.get_component_mut::<MeshRendererComponent>(entity) {
        renderer.hidden = hidden;
    }
}

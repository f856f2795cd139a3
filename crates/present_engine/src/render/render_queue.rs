//! Render queue for one frame
//!
//! Collects render commands into three buckets by material flags. The bucket
//! vectors are cleared and refilled every frame so their allocations are reused.

use super::assets::{MaterialHandle, MeshHandle};
use crate::ecs::Entity;
use crate::foundation::math::{Mat4, Vec3};
use std::cmp::Ordering;

/// A single draw for the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    /// Entity the command was built from
    pub entity: Entity,
    /// Model matrix
    pub local_to_world: Mat4,
    /// World-space origin of the entity, used for transparency sorting
    pub center: Vec3,
    /// Mesh to draw
    pub mesh: MeshHandle,
    /// Material to set up
    pub material: MaterialHandle,
    /// Set up but don't draw
    pub hidden: bool,
}

/// Draw bucket, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderBucket {
    /// Default bucket
    Opaque,
    /// Blended, sorted back to front
    Transparent,
    /// Screen-space game items, drawn last
    Overlay,
}

impl RenderBucket {
    /// Buckets in the order they are drawn
    pub const DRAW_ORDER: [Self; 3] = [Self::Opaque, Self::Transparent, Self::Overlay];

    /// Classify by material flags; transparency wins over the overlay flag
    pub fn classify(transparent: bool, game_screen_item: bool) -> Self {
        if transparent {
            Self::Transparent
        } else if game_screen_item {
            Self::Overlay
        } else {
            Self::Opaque
        }
    }
}

/// Bucketed render commands
#[derive(Debug, Default)]
pub struct RenderQueue {
    opaque: Vec<RenderCommand>,
    transparent: Vec<RenderCommand>,
    overlay: Vec<RenderCommand>,
}

impl RenderQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty every bucket, keeping capacity
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
        self.overlay.clear();
    }

    /// Append a command to a bucket
    pub fn push(&mut self, bucket: RenderBucket, command: RenderCommand) {
        self.bucket_mut(bucket).push(command);
    }

    /// Commands in a bucket
    pub fn bucket(&self, bucket: RenderBucket) -> &[RenderCommand] {
        match bucket {
            RenderBucket::Opaque => &self.opaque,
            RenderBucket::Transparent => &self.transparent,
            RenderBucket::Overlay => &self.overlay,
        }
    }

    fn bucket_mut(&mut self, bucket: RenderBucket) -> &mut Vec<RenderCommand> {
        match bucket {
            RenderBucket::Opaque => &mut self.opaque,
            RenderBucket::Transparent => &mut self.transparent,
            RenderBucket::Overlay => &mut self.overlay,
        }
    }

    /// Sort transparent commands back to front along `camera_forward`
    ///
    /// A command comes first when it lies farther along the view direction.
    /// The sort is stable, so ties keep the order they were pushed in.
    pub fn sort_transparent(&mut self, camera_forward: Vec3) {
        self.transparent.sort_by(|a, b| {
            let a_depth = a.center.dot(&camera_forward);
            let b_depth = b.center.dot(&camera_forward);
            b_depth.partial_cmp(&a_depth).unwrap_or(Ordering::Equal)
        });
    }

    /// Total commands queued
    pub fn len(&self) -> usize {
        self.opaque.len() + self.transparent.len() + self.overlay.len()
    }

    /// True when no commands are queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use crate::render::assets::AssetRegistry;
    use crate::render::material::Material;
    use crate::render::mesh::Mesh;
    use crate::render::ShaderHandle;

    fn command(world: &mut World, registry: &mut AssetRegistry, z: f32) -> RenderCommand {
        let entity = world.create_entity();
        let mesh = registry.insert_mesh(format!("mesh{z}"), Mesh::with_bounds(Vec3::zeros(), Vec3::zeros(), 3));
        let material = registry.insert_material(format!("mat{z}"), Material::new(ShaderHandle::default()));
        RenderCommand {
            entity,
            local_to_world: Mat4::identity(),
            center: Vec3::new(0.0, 0.0, z),
            mesh,
            material,
            hidden: false,
        }
    }

    #[test]
    fn test_classify_prefers_transparency() {
        assert_eq!(RenderBucket::classify(false, false), RenderBucket::Opaque);
        assert_eq!(RenderBucket::classify(true, false), RenderBucket::Transparent);
        assert_eq!(RenderBucket::classify(false, true), RenderBucket::Overlay);
        assert_eq!(RenderBucket::classify(true, true), RenderBucket::Transparent);
    }

    #[test]
    fn test_transparent_sorted_back_to_front() {
        let mut world = World::new();
        let mut registry = AssetRegistry::new();
        let mut queue = RenderQueue::new();
        for z in [-2.0, -10.0, -5.0] {
            let cmd = command(&mut world, &mut registry, z);
            queue.push(RenderBucket::Transparent, cmd);
        }

        // Camera at the origin looking down -Z: the most negative z is farthest
        queue.sort_transparent(Vec3::new(0.0, 0.0, -1.0));
        let order: Vec<f32> = queue.bucket(RenderBucket::Transparent).iter().map(|c| c.center.z).collect();
        assert_eq!(order, vec![-10.0, -5.0, -2.0]);

        // Every earlier command satisfies dot(later - earlier, forward) <= 0
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let sorted = queue.bucket(RenderBucket::Transparent);
        for pair in sorted.windows(2) {
            assert!((pair[1].center - pair[0].center).dot(&forward) <= 0.0);
        }
    }

    #[test]
    fn test_sort_keeps_ties_in_push_order() {
        let mut world = World::new();
        let mut registry = AssetRegistry::new();
        let mut queue = RenderQueue::new();
        let first = command(&mut world, &mut registry, -3.0);
        let mut second = command(&mut world, &mut registry, -4.0);
        second.center = Vec3::new(5.0, 0.0, -3.0);
        let (first_entity, second_entity) = (first.entity, second.entity);
        queue.push(RenderBucket::Transparent, first);
        queue.push(RenderBucket::Transparent, second);

        queue.sort_transparent(Vec3::new(0.0, 0.0, -1.0));
        let order: Vec<Entity> = queue.bucket(RenderBucket::Transparent).iter().map(|c| c.entity).collect();
        assert_eq!(order, vec![first_entity, second_entity]);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut world = World::new();
        let mut registry = AssetRegistry::new();
        let mut queue = RenderQueue::new();
        let cmd = command(&mut world, &mut registry, 0.0);
        queue.push(RenderBucket::Opaque, cmd);
        assert_eq!(queue.len(), 1);

        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.opaque.capacity() >= 1);
    }
}

//! ECS World implementation
//!
//! The world is the sole owner of every entity. Parent links are weak: they
//! are entity keys looked up in the world's table, never owning pointers, so
//! destroying or re-parenting an entity can't leave a dangling reference.

use super::{Component, Entity};
use crate::foundation::math::{Mat4, Transform};
use slotmap::SlotMap;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Per-entity storage
struct EntityRecord {
    name: Option<String>,
    parent: Option<Entity>,
    local_transform: Transform,
    last_non_collided_transform: Option<Transform>,
    components: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl EntityRecord {
    fn new(parent: Option<Entity>) -> Self {
        Self {
            name: None,
            parent,
            local_transform: Transform::default(),
            last_non_collided_transform: None,
            components: HashMap::new(),
        }
    }
}

/// ECS World containing all entities and components
pub struct World {
    records: SlotMap<Entity, EntityRecord>,
    /// Creation order; the iteration order systems observe
    order: Vec<Entity>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            records: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Create a new root entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.records.insert(EntityRecord::new(None));
        self.order.push(entity);
        entity
    }

    /// Create a new entity parented to `parent`
    ///
    /// A dead parent yields a root entity.
    pub fn create_child(&mut self, parent: Entity) -> Entity {
        let parent = self.records.contains_key(parent).then_some(parent);
        let entity = self.records.insert(EntityRecord::new(parent));
        self.order.push(entity);
        entity
    }

    /// Destroy an entity and all of its components
    ///
    /// Children of the destroyed entity become roots. Returns `false` if the
    /// entity was already dead.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if self.records.remove(entity).is_none() {
            return false;
        }
        self.order.retain(|e| *e != entity);
        for record in self.records.values_mut() {
            if record.parent == Some(entity) {
                record.parent = None;
            }
        }
        true
    }

    /// Remove every entity
    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }

    /// Whether the entity is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.records.contains_key(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the world holds no entities
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate all live entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    /// Debug name of an entity
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.records.get(entity)?.name.as_deref()
    }

    /// Set the debug name of an entity
    pub fn set_name(&mut self, entity: Entity, name: impl Into<String>) {
        if let Some(record) = self.records.get_mut(entity) {
            record.name = Some(name.into());
        }
    }

    /// First entity carrying the given debug name
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.entities().find(|e| self.name(*e) == Some(name))
    }

    // ---------------------------------------------------------------------
    // Hierarchy
    // ---------------------------------------------------------------------

    /// Parent of an entity, if it has a live one
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.records.get(entity)?.parent
    }

    /// Re-parent an entity (`None` makes it a root)
    ///
    /// Returns `false` and leaves the hierarchy untouched when either entity is
    /// dead or the new link would create a cycle.
    pub fn set_parent(&mut self, entity: Entity, parent: Option<Entity>) -> bool {
        if !self.contains(entity) {
            return false;
        }
        if let Some(new_parent) = parent {
            if !self.contains(new_parent) {
                return false;
            }
            let mut cursor = Some(new_parent);
            while let Some(ancestor) = cursor {
                if ancestor == entity {
                    return false;
                }
                cursor = self.parent(ancestor);
            }
        }
        if let Some(record) = self.records.get_mut(entity) {
            record.parent = parent;
        }
        true
    }

    /// Direct children of an entity, in creation order
    pub fn children(&self, entity: Entity) -> impl Iterator<Item = Entity> + '_ {
        self.entities().filter(move |e| self.parent(*e) == Some(entity))
    }

    // ---------------------------------------------------------------------
    // Transforms
    // ---------------------------------------------------------------------

    /// Local transform of an entity
    pub fn local_transform(&self, entity: Entity) -> Option<&Transform> {
        self.records.get(entity).map(|r| &r.local_transform)
    }

    /// Mutable local transform of an entity
    pub fn local_transform_mut(&mut self, entity: Entity) -> Option<&mut Transform> {
        self.records.get_mut(entity).map(|r| &mut r.local_transform)
    }

    /// Replace the local transform of an entity
    pub fn set_local_transform(&mut self, entity: Entity, transform: Transform) {
        if let Some(record) = self.records.get_mut(entity) {
            record.local_transform = transform;
        }
    }

    /// Last transform recorded as collision-free for this entity
    ///
    /// `None` until one has been recorded.
    pub fn last_non_collided_transform(&self, entity: Entity) -> Option<&Transform> {
        self.records
            .get(entity)
            .and_then(|r| r.last_non_collided_transform.as_ref())
    }

    /// Record the collision-free rollback transform for this entity
    pub fn set_last_non_collided_transform(&mut self, entity: Entity, transform: Transform) {
        if let Some(record) = self.records.get_mut(entity) {
            record.last_non_collided_transform = Some(transform);
        }
    }

    /// Local-to-world matrix: `parent_world * local`, identity above the root
    ///
    /// Recomputed on every call by walking the parent chain. A dead entity
    /// yields the identity matrix.
    pub fn local_to_world_matrix(&self, entity: Entity) -> Mat4 {
        let mut matrix = Mat4::identity();
        let mut cursor = Some(entity);
        while let Some(current) = cursor {
            let Some(record) = self.records.get(current) else {
                break;
            };
            matrix = record.local_transform.to_matrix() * matrix;
            cursor = record.parent;
        }
        matrix
    }

    // ---------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------

    /// Add a component to an entity, replacing any previous instance of `T`
    ///
    /// Returns the replaced component, if any.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        let record = self.records.get_mut(entity)?;
        record
            .components
            .insert(TypeId::of::<T>(), Box::new(component))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.records
            .get(entity)?
            .components
            .get(&TypeId::of::<T>())?
            .downcast_ref::<T>()
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.records
            .get_mut(entity)?
            .components
            .get_mut(&TypeId::of::<T>())?
            .downcast_mut::<T>()
    }

    /// Whether the entity carries a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.records
            .get(entity)
            .is_some_and(|r| r.components.contains_key(&TypeId::of::<T>()))
    }

    /// Detach and return a component
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.records
            .get_mut(entity)?
            .components
            .remove(&TypeId::of::<T>())
            .and_then(|old| old.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Entities carrying a component of type `T`, in creation order
    pub fn entities_with<T: Component>(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities().filter(move |e| self.has_component::<T>(*e))
    }

    /// All `(entity, component)` pairs for component type `T`, in creation order
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        self.entities()
            .filter_map(|e| self.get_component::<T>(e).map(|c| (e, c)))
            .collect()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

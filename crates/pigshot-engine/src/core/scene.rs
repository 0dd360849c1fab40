use std::collections::HashMap;

use crate::api::error::{EngineError, EngineResult};
use crate::api::types::EntityId;
use crate::components::entity::{Entity, Group};

/// Entity arena with a name index and a per-group index.
///
/// Entities are appended at authoring time and never removed; "death" is
/// `visible = false`. Handles are arena indices, so the hot loops never
/// touch the name map.
pub struct Scene {
    entities: Vec<Entity>,
    names: HashMap<String, EntityId>,
    groups: [Vec<EntityId>; Group::COUNT],
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            names: HashMap::with_capacity(capacity),
            groups: Default::default(),
        }
    }

    /// Handle the next spawned entity will receive.
    pub fn next_id(&self) -> EntityId {
        EntityId(self.entities.len() as u32)
    }

    /// Add an entity. Its `id` is overwritten with the arena slot.
    pub fn spawn(&mut self, mut entity: Entity) -> EngineResult<EntityId> {
        if self.names.contains_key(&entity.name) {
            return Err(EngineError::DuplicateName { name: entity.name });
        }
        let id = self.next_id();
        entity.id = id;
        self.names.insert(entity.name.clone(), id);
        self.groups[entity.group.index()].push(id);
        self.entities.push(entity);
        Ok(id)
    }

    /// Resolve a name to its handle.
    pub fn lookup(&self, name: &str) -> EngineResult<EntityId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::LookupMiss { name: name.to_string() })
    }

    /// Direct access by handle. Panics on a handle from another scene.
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.index()]
    }

    /// Direct mutable access by handle. Panics on a handle from another scene.
    pub fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.index()]
    }

    /// Mutable access to two distinct entities at once.
    pub fn pair_mut(&mut self, a: EntityId, b: EntityId) -> (&mut Entity, &mut Entity) {
        assert_ne!(a, b, "pair_mut needs two distinct entities");
        let (ia, ib) = (a.index(), b.index());
        if ia < ib {
            let (lo, hi) = self.entities.split_at_mut(ib);
            (&mut lo[ia], &mut hi[0])
        } else {
            let (lo, hi) = self.entities.split_at_mut(ia);
            (&mut hi[0], &mut lo[ib])
        }
    }

    /// Handles in `group`, in authoring order.
    pub fn group(&self, group: Group) -> &[EntityId] {
        &self.groups[group.index()]
    }

    /// Iterate over the entities of one group.
    pub fn iter_group(&self, group: Group) -> impl Iterator<Item = &Entity> {
        self.groups[group.index()].iter().map(move |id| &self.entities[id.index()])
    }

    /// Iterate over all entities, group by group in `Group::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        Group::ALL.into_iter().flat_map(move |g| self.iter_group(g))
    }

    /// Iterate over all entities mutably, in arena order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn spawn_and_lookup() {
        let mut scene = Scene::new();
        let id = scene
            .spawn(Entity::new(EntityId(99), "crate").with_pos(Vec2::new(10.0, 20.0)))
            .unwrap();
        assert_eq!(id, EntityId(0));
        assert_eq!(scene.lookup("crate").unwrap(), id);
        assert_eq!(scene.entity(id).pos, Vec2::new(10.0, 20.0));
        assert_eq!(scene.entity(id).id, id);
    }

    #[test]
    fn unknown_name_is_a_lookup_miss() {
        let scene = Scene::new();
        assert!(matches!(
            scene.lookup("ghost"),
            Err(EngineError::LookupMiss { name }) if name == "ghost"
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(0), "wall")).unwrap();
        let err = scene.spawn(Entity::new(EntityId(0), "wall")).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateName { .. }));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn group_index_partitions_entities() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(0), "ball")).unwrap();
        scene
            .spawn(Entity::new(EntityId(0), "barrel").with_group(Group::Cannon))
            .unwrap();
        scene
            .spawn(Entity::new(EntityId(0), "coin").with_group(Group::Coin))
            .unwrap();
        scene.spawn(Entity::new(EntityId(0), "crate")).unwrap();

        let free: Vec<&str> = scene.iter_group(Group::Free).map(|e| e.name.as_str()).collect();
        assert_eq!(free, ["ball", "crate"]);
        assert_eq!(scene.group(Group::Cannon).len(), 1);
        assert_eq!(scene.iter().count(), 4);
    }

    #[test]
    fn pair_mut_returns_both_in_order() {
        let mut scene = Scene::new();
        let a = scene.spawn(Entity::new(EntityId(0), "a")).unwrap();
        let b = scene.spawn(Entity::new(EntityId(0), "b")).unwrap();
        let (eb, ea) = scene.pair_mut(b, a);
        assert_eq!(eb.name, "b");
        assert_eq!(ea.name, "a");
    }
}

// core/composite.rs
//
// Composite targets: a root body in the Free group plus decorative parts
// (ears, eyes, nose) stored as offsets from the root. Parts never simulate;
// their world pose is derived from the root whenever it is read.

use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Pose;
use crate::core::scene::Scene;

#[derive(Debug, Clone, Default)]
struct CompositeNode {
    parts: Vec<EntityId>,
    /// Part revealed once the root is badly hurt.
    hurt_overlay: Option<EntityId>,
}

/// Root → parts relationships.
#[derive(Debug, Default)]
pub struct CompositeGraph {
    nodes: HashMap<EntityId, CompositeNode>,
    parents: HashMap<EntityId, EntityId>,
}

impl CompositeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hang `part` off `root`. Re-attaching moves it to the new root.
    pub fn attach(&mut self, root: EntityId, part: EntityId) {
        if let Some(old) = self.parents.insert(part, root) {
            if let Some(node) = self.nodes.get_mut(&old) {
                node.parts.retain(|&p| p != part);
            }
        }
        let node = self.nodes.entry(root).or_default();
        if !node.parts.contains(&part) {
            node.parts.push(part);
        }
    }

    /// Mark `overlay` (attached if needed) as the root's hurt overlay.
    pub fn set_hurt_overlay(&mut self, root: EntityId, overlay: EntityId) {
        self.attach(root, overlay);
        if let Some(node) = self.nodes.get_mut(&root) {
            node.hurt_overlay = Some(overlay);
        }
    }

    pub fn hurt_overlay(&self, root: EntityId) -> Option<EntityId> {
        self.nodes.get(&root).and_then(|n| n.hurt_overlay)
    }

    pub fn parent(&self, part: EntityId) -> Option<EntityId> {
        self.parents.get(&part).copied()
    }

    pub fn parts(&self, root: EntityId) -> &[EntityId] {
        self.nodes.get(&root).map(|n| n.parts.as_slice()).unwrap_or(&[])
    }

    /// World pose of any entity. Parts are offset (and turned) with their root.
    pub fn world_pose(&self, scene: &Scene, id: EntityId) -> Pose {
        let entity = scene.entity(id);
        let Some(root) = self.parent(id) else {
            return entity.pose();
        };
        let root = scene.entity(root);
        let (sin_r, cos_r) = root.rotation.sin_cos();
        let offset = entity.pos;
        let rotated = Vec2::new(
            offset.x * cos_r - offset.y * sin_r,
            offset.x * sin_r + offset.y * cos_r,
        );
        Pose {
            pos: root.pos + rotated,
            rotation: root.rotation + entity.rotation,
        }
    }

    /// Visible on screen: the entity and, for parts, its root.
    pub fn is_shown(&self, scene: &Scene, id: EntityId) -> bool {
        let visible = scene.entity(id).visible;
        match self.parent(id) {
            Some(root) => visible && scene.entity(root).visible,
            None => visible,
        }
    }

    /// Show the root's hurt overlay. Returns `true` only the first time.
    pub fn reveal_hurt(&self, scene: &mut Scene, root: EntityId) -> bool {
        let Some(overlay) = self.hurt_overlay(root) else {
            return false;
        };
        let overlay = scene.entity_mut(overlay);
        if overlay.visible {
            return false;
        }
        overlay.visible = true;
        true
    }

    /// Number of registered roots.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::{Entity, Group};
    use std::f32::consts::FRAC_PI_2;

    fn pig_scene() -> (Scene, EntityId, EntityId, EntityId) {
        let mut scene = Scene::new();
        let root = scene
            .spawn(Entity::new(EntityId(0), "pig").with_pos(Vec2::new(320.0, -155.0)))
            .unwrap();
        let ear = scene
            .spawn(
                Entity::new(EntityId(0), "pig_ear")
                    .with_group(Group::Part)
                    .with_pos(Vec2::new(17.0, 13.0)),
            )
            .unwrap();
        let hurt = scene
            .spawn(
                Entity::new(EntityId(0), "pig_hurt")
                    .with_group(Group::Part)
                    .with_pos(Vec2::new(-14.0, 0.0))
                    .with_visible(false),
            )
            .unwrap();
        (scene, root, ear, hurt)
    }

    #[test]
    fn part_follows_root_translation() {
        let (scene, root, ear, _) = pig_scene();
        let mut graph = CompositeGraph::new();
        graph.attach(root, ear);
        let pose = graph.world_pose(&scene, ear);
        assert_eq!(pose.pos, Vec2::new(337.0, -142.0));
        assert_eq!(graph.parts(root), [ear].as_slice());
    }

    #[test]
    fn part_orbits_rotated_root() {
        let (mut scene, root, ear, _) = pig_scene();
        let mut graph = CompositeGraph::new();
        graph.attach(root, ear);
        scene.entity_mut(root).rotation = FRAC_PI_2;
        let pose = graph.world_pose(&scene, ear);
        // (17, 13) turned a quarter counter-clockwise is (-13, 17)
        assert!((pose.pos.x - (320.0 - 13.0)).abs() < 1e-3);
        assert!((pose.pos.y - (-155.0 + 17.0)).abs() < 1e-3);
        assert!((pose.rotation - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn hidden_root_hides_parts() {
        let (mut scene, root, ear, _) = pig_scene();
        let mut graph = CompositeGraph::new();
        graph.attach(root, ear);
        assert!(graph.is_shown(&scene, ear));
        scene.entity_mut(root).visible = false;
        assert!(!graph.is_shown(&scene, ear));
    }

    #[test]
    fn hurt_overlay_reveals_once() {
        let (mut scene, root, _, hurt) = pig_scene();
        let mut graph = CompositeGraph::new();
        graph.set_hurt_overlay(root, hurt);
        assert!(graph.reveal_hurt(&mut scene, root));
        assert!(scene.entity(hurt).visible);
        assert!(!graph.reveal_hurt(&mut scene, root));
    }

    #[test]
    fn reattach_moves_part() {
        let (mut scene, root, ear, _) = pig_scene();
        let other = scene.spawn(Entity::new(EntityId(0), "pig2")).unwrap();
        let mut graph = CompositeGraph::new();
        graph.attach(root, ear);
        graph.attach(other, ear);
        assert!(graph.parts(root).is_empty());
        assert_eq!(graph.parent(ear), Some(other));
    }
}

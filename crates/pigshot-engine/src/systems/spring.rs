//! Spring chains: landing on a trigger plate presses a set of linked
//! kinematic bodies down, and the fully pressed chain reveals a goal.

use crate::api::types::EntityId;
use crate::components::animation::{CompressMode, MotionAnim};
use crate::core::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringPhase {
    Armed,
    Compressing,
    Done,
}

#[derive(Debug, Clone)]
pub struct SpringChain {
    /// Plate the projectile has to land on.
    pub trigger: EntityId,
    pub links: Vec<(EntityId, CompressMode)>,
    /// Hidden until the chain completes.
    pub goal: Option<EntityId>,
    /// Total travel of each link.
    pub depth: f32,
    phase: SpringPhase,
}

impl SpringChain {
    pub fn new(trigger: EntityId, depth: f32) -> Self {
        Self {
            trigger,
            links: Vec::new(),
            goal: None,
            depth,
            phase: SpringPhase::Armed,
        }
    }

    pub fn with_link(mut self, id: EntityId, mode: CompressMode) -> Self {
        self.links.push((id, mode));
        self
    }

    pub fn with_goal(mut self, goal: EntityId) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn phase(&self) -> SpringPhase {
        self.phase
    }

    /// The projectile came down on `support`. Starts compressing on the
    /// first landing on the trigger; returns whether it did.
    pub fn on_landed(&mut self, scene: &mut Scene, support: EntityId) -> bool {
        if self.phase != SpringPhase::Armed || support != self.trigger {
            return false;
        }
        for &(id, mode) in &self.links {
            scene.entity_mut(id).motion = MotionAnim::compress(self.depth, mode);
        }
        self.phase = SpringPhase::Compressing;
        log::debug!("spring triggered ({} links)", self.links.len());
        true
    }

    /// Finish the chain once every link is pressed. Returns the goal the
    /// first time it is revealed, `None` on every other call.
    pub fn poll_complete(&mut self, scene: &mut Scene) -> Option<EntityId> {
        if self.phase != SpringPhase::Compressing {
            return None;
        }
        let pressed = self
            .links
            .iter()
            .all(|&(id, _)| scene.entity(id).motion == MotionAnim::Compressed);
        if !pressed {
            return None;
        }
        self.phase = SpringPhase::Done;
        log::info!("spring chain complete");
        let goal = self.goal?;
        scene.entity_mut(goal).visible = true;
        Some(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::RecoilProfile;
    use crate::components::entity::{BodyKind, Entity, Group};
    use crate::components::shape::Shape;
    use crate::systems::animation::tick_motion;
    use glam::Vec2;

    fn spring_scene() -> (Scene, SpringChain) {
        let mut scene = Scene::new();
        let plate = scene
            .spawn(
                Entity::new(EntityId(0), "plate")
                    .with_kind(BodyKind::Kinematic)
                    .with_shape(Shape::rect(40.0, 20.0))
                    .with_pos(Vec2::new(0.0, 90.0)),
            )
            .unwrap();
        let coil = scene
            .spawn(
                Entity::new(EntityId(0), "coil")
                    .with_kind(BodyKind::Kinematic)
                    .with_shape(Shape::rect(20.0, 40.0))
                    .with_pos(Vec2::new(0.0, 60.0)),
            )
            .unwrap();
        let goal = scene
            .spawn(
                Entity::new(EntityId(0), "goal")
                    .with_group(Group::Goal)
                    .with_shape(Shape::circle(15.0))
                    .with_visible(false),
            )
            .unwrap();
        let chain = SpringChain::new(plate, 15.0)
            .with_link(plate, CompressMode::Slide)
            .with_link(coil, CompressMode::Squash)
            .with_goal(goal);
        (scene, chain)
    }

    #[test]
    fn landing_elsewhere_does_nothing() {
        let (mut scene, mut chain) = spring_scene();
        let coil = scene.lookup("coil").unwrap();
        assert!(!chain.on_landed(&mut scene, coil));
        assert_eq!(chain.phase(), SpringPhase::Armed);
    }

    #[test]
    fn chain_reveals_goal_once() {
        let (mut scene, mut chain) = spring_scene();
        let plate = scene.lookup("plate").unwrap();
        let goal = scene.lookup("goal").unwrap();

        assert!(chain.on_landed(&mut scene, plate));
        assert!(!chain.on_landed(&mut scene, plate));

        let mut revealed = Vec::new();
        for _ in 0..20 {
            tick_motion(&mut scene, &RecoilProfile::default());
            revealed.extend(chain.poll_complete(&mut scene));
        }
        assert_eq!(revealed, vec![goal]);
        assert!(scene.entity(goal).visible);
        assert_eq!(chain.phase(), SpringPhase::Done);
        assert_eq!(scene.entity(plate).pos.y, 75.0);
    }

    #[test]
    fn collected_goal_is_not_revealed_again() {
        let (mut scene, mut chain) = spring_scene();
        let plate = scene.lookup("plate").unwrap();
        let goal = scene.lookup("goal").unwrap();
        chain.on_landed(&mut scene, plate);
        for _ in 0..15 {
            tick_motion(&mut scene, &RecoilProfile::default());
        }
        assert_eq!(chain.poll_complete(&mut scene), Some(goal));
        scene.entity_mut(goal).visible = false;
        assert_eq!(chain.poll_complete(&mut scene), None);
        assert!(!scene.entity(goal).visible);
    }
}

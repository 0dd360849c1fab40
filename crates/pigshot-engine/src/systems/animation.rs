//! Animation system: advances spins and scripted motion once per tick.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::animation::RecoilProfile;
use crate::components::entity::Group;
use crate::components::shape::Shape;
use crate::core::physics::{overlaps_any, PhysicsConfig};
use crate::core::scene::Scene;

/// Turn every spinning free body by one step.
///
/// Each step also nudges the body sideways; a nudge that would push it
/// into another collider is taken back.
pub fn tick_spins(scene: &mut Scene, config: &PhysicsConfig) {
    let count = scene.group(Group::Free).len();
    for i in 0..count {
        let id = scene.group(Group::Free)[i];
        let entity = scene.entity_mut(id);
        let Some(mut spin) = entity.spin else { continue };
        if !entity.visible {
            entity.spin = None;
            continue;
        }

        let turned = spin.advance(config.spin_step_deg);
        entity.rotation += turned.to_radians();
        let nudge = Vec2::new(spin.direction.nudge_sign() * config.spin_nudge, 0.0);
        entity.pos += nudge;
        entity.spin = if spin.is_done() { None } else { Some(spin) };

        if overlaps_any(scene, id) {
            scene.entity_mut(id).pos -= nudge;
        }
    }
}

/// Advance every active motion animation (recoil, spring compression).
///
/// Returns the entities whose animation reached a resting phase this tick.
pub fn tick_motion(scene: &mut Scene, recoil: &RecoilProfile) -> Vec<EntityId> {
    let mut finished = Vec::new();
    for entity in scene.iter_mut() {
        if !entity.motion.is_active() {
            continue;
        }
        let step = entity.motion.advance(recoil);
        entity.pos += step.offset;
        if step.shrink > 0.0 {
            if let Shape::Rect { width, height } = entity.shape {
                entity.shape = Shape::rect(width, (height - step.shrink).max(0.0));
            }
        }
        if step.finished {
            finished.push(entity.id);
        }
    }
    finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::{CompressMode, MotionAnim, SpinDirection, SpinState};
    use crate::components::entity::{BodyKind, Entity};

    #[test]
    fn spin_turns_ninety_degrees_then_stops() {
        let config = PhysicsConfig::default();
        let mut scene = Scene::new();
        let pig = scene
            .spawn(
                Entity::new(EntityId(0), "pig")
                    .with_shape(Shape::circle(20.0)),
            )
            .unwrap();
        scene.entity_mut(pig).spin = Some(SpinState::new(SpinDirection::CounterClockwise, 90.0));

        for _ in 0..10 {
            tick_spins(&mut scene, &config);
        }
        let e = scene.entity(pig);
        assert!(e.spin.is_none());
        assert!((e.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        // Counter-clockwise drifts left.
        assert!((e.pos.x + 5.0).abs() < 1e-4);

        tick_spins(&mut scene, &config);
        assert!((scene.entity(pig).rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn blocked_nudge_is_undone() {
        let config = PhysicsConfig::default();
        let mut scene = Scene::new();
        let pig = scene
            .spawn(Entity::new(EntityId(0), "pig").with_shape(Shape::circle(20.0)))
            .unwrap();
        scene
            .spawn(
                Entity::new(EntityId(0), "wall")
                    .with_kind(BodyKind::Fixed)
                    .with_shape(Shape::rect(20.0, 100.0))
                    .with_pos(Vec2::new(30.0, 0.0)),
            )
            .unwrap();
        scene.entity_mut(pig).spin = Some(SpinState::new(SpinDirection::Clockwise, 90.0));

        tick_spins(&mut scene, &config);
        let e = scene.entity(pig);
        assert_eq!(e.pos.x, 0.0);
        assert!(e.rotation < 0.0);
    }

    #[test]
    fn squash_keeps_bottom_edge() {
        let mut scene = Scene::new();
        let coil = scene
            .spawn(
                Entity::new(EntityId(0), "coil")
                    .with_kind(BodyKind::Kinematic)
                    .with_shape(Shape::rect(20.0, 40.0))
                    .with_pos(Vec2::new(0.0, 70.0)),
            )
            .unwrap();
        scene.entity_mut(coil).motion = MotionAnim::compress(15.0, CompressMode::Squash);

        let mut done = Vec::new();
        for _ in 0..15 {
            done = tick_motion(&mut scene, &RecoilProfile::default());
        }
        assert_eq!(done, vec![coil]);
        let e = scene.entity(coil);
        assert_eq!(e.shape, Shape::rect(20.0, 25.0));
        assert_eq!(e.pos.y - 12.5, 50.0);
        assert_eq!(e.motion, MotionAnim::Compressed);
        assert!(tick_motion(&mut scene, &RecoilProfile::default()).is_empty());
    }

    #[test]
    fn recoil_returns_to_rest() {
        let profile = RecoilProfile::default();
        let mut scene = Scene::new();
        let barrel = scene
            .spawn(
                Entity::new(EntityId(0), "barrel")
                    .with_group(Group::Cannon)
                    .with_pos(Vec2::new(-275.0, -210.0)),
            )
            .unwrap();
        scene.entity_mut(barrel).motion = MotionAnim::recoil(&profile);

        let mut lowest = 0.0f32;
        let mut finished_at = None;
        for tick in 0..30 {
            if !tick_motion(&mut scene, &profile).is_empty() && finished_at.is_none() {
                finished_at = Some(tick);
            }
            lowest = lowest.min(scene.entity(barrel).pos.x + 275.0);
        }
        assert_eq!(lowest, -16.0);
        assert_eq!(finished_at, Some(19));
        assert_eq!(scene.entity(barrel).pos.x, -275.0);
    }
}

use crate::components::shape::Shape;
use crate::core::composite::CompositeGraph;
use crate::core::scene::Scene;
use crate::renderer::instance::{shape_code, PoseBuffer, PoseInstance};

/// Build the pose buffer from every group in one pass.
/// Composite parts are written at their world pose; hidden entities
/// (or parts of hidden roots) are skipped.
pub fn build_pose_buffer(scene: &Scene, composites: &CompositeGraph, buffer: &mut PoseBuffer) {
    buffer.clear();

    for entity in scene.iter() {
        if !composites.is_shown(scene, entity.id) {
            continue;
        }
        let pose = composites.world_pose(scene, entity.id);
        let size = entity.shape.size();
        let shape = match entity.shape {
            Shape::Rect { .. } => shape_code::RECT,
            Shape::Circle { .. } => shape_code::CIRCLE,
            Shape::Decoration => shape_code::DECORATION,
        };
        buffer.push(PoseInstance {
            id: entity.id.0 as f32,
            group: entity.group.index() as f32,
            x: pose.pos.x,
            y: pose.pos.y,
            rotation: pose.rotation,
            width: size.x,
            height: size.y,
            shape,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::entity::{Entity, Group};
    use glam::Vec2;

    fn pig_scene() -> (Scene, CompositeGraph) {
        let mut scene = Scene::new();
        let pig = scene
            .spawn(
                Entity::new(EntityId(0), "pig")
                    .with_shape(Shape::circle(20.0))
                    .with_pos(Vec2::new(320.0, -155.0)),
            )
            .unwrap();
        let ear = scene
            .spawn(
                Entity::new(EntityId(0), "pig_ear")
                    .with_group(Group::Part)
                    .with_shape(Shape::circle(7.0))
                    .with_pos(Vec2::new(-17.0, 13.0)),
            )
            .unwrap();
        let hurt = scene
            .spawn(
                Entity::new(EntityId(0), "pig_hurt")
                    .with_group(Group::Part)
                    .with_shape(Shape::circle(8.0))
                    .with_visible(false),
            )
            .unwrap();
        scene
            .spawn(
                Entity::new(EntityId(0), "sky")
                    .with_group(Group::Background)
                    .with_shape(Shape::rect(800.0, 600.0)),
            )
            .unwrap();
        let mut composites = CompositeGraph::new();
        composites.attach(pig, ear);
        composites.set_hurt_overlay(pig, hurt);
        (scene, composites)
    }

    #[test]
    fn parts_are_written_in_world_space() {
        let (scene, composites) = pig_scene();
        let mut buffer = PoseBuffer::new();
        build_pose_buffer(&scene, &composites, &mut buffer);

        // pig, ear, sky; the hurt overlay is hidden
        assert_eq!(buffer.instance_count(), 3);
        let ear = buffer
            .instances
            .iter()
            .find(|i| i.id == 1.0)
            .unwrap();
        assert_eq!((ear.x, ear.y), (303.0, -142.0));
        assert_eq!(ear.width, 14.0);
        assert_eq!(ear.shape, shape_code::CIRCLE);
    }

    #[test]
    fn dead_root_hides_its_parts() {
        let (mut scene, composites) = pig_scene();
        let pig = scene.lookup("pig").unwrap();
        scene.entity_mut(pig).apply_damage(100);

        let mut buffer = PoseBuffer::new();
        build_pose_buffer(&scene, &composites, &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
        assert_eq!(buffer.instances[0].group, Group::Background.index() as f32);
    }
}

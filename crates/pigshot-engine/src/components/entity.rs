use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::animation::{MotionAnim, SpinState};
use crate::components::shape::Shape;
use crate::core::collision::Aabb;

/// Starting (and maximum) health of every entity.
pub const FULL_HEALTH: i32 = 100;

/// Partition of the scene. Physics and collision only ever look at `Free`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Simulated bodies: projectile, crates, pigs, walls, floor.
    Free,
    /// Kinematic cannon pieces, moved only by the launch controller.
    Cannon,
    /// Static pickups consumed on contact with the projectile.
    Coin,
    /// Static triggers, usually hidden until revealed.
    Goal,
    /// Render-only scenery and HUD.
    Background,
    /// Sub-entities of a composite target, positioned by offset.
    Part,
}

impl Group {
    pub const COUNT: usize = 6;

    pub const ALL: [Group; Group::COUNT] = [
        Group::Free,
        Group::Cannon,
        Group::Coin,
        Group::Goal,
        Group::Background,
        Group::Part,
    ];

    pub const fn index(self) -> usize {
        match self {
            Group::Free => 0,
            Group::Cannon => 1,
            Group::Coin => 2,
            Group::Goal => 3,
            Group::Background => 4,
            Group::Part => 5,
        }
    }
}

/// How a body responds to collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Integrated and pushed around by collisions.
    #[default]
    Dynamic,
    /// World geometry. Never moves.
    Fixed,
    /// Immovable to collisions but moved by scripted animation.
    Kinematic,
}

impl BodyKind {
    /// Fixed for collision purposes: no impulse, no repositioning.
    pub fn is_immovable(self) -> bool {
        !matches!(self, BodyKind::Dynamic)
    }
}

/// Which narrow-phase a moving body uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// Directional axis-aligned box tests.
    #[default]
    Box,
    /// Center-distance test against bounding radii.
    Sphere,
}

/// Position and orientation handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub pos: Vec2,
    /// Radians, counter-clockwise.
    pub rotation: f32,
}

/// Fat sprite: one struct carrying everything a body can need.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub group: Group,
    pub kind: BodyKind,
    /// World-space centroid (for parts: offset from the composite root).
    pub pos: Vec2,
    /// Displacement per reference tick.
    pub vel: Vec2,
    /// Radians.
    pub rotation: f32,
    pub shape: Shape,
    pub mass: f32,
    /// Damping coefficient in `[0, 1]` applied to whatever this body hits.
    pub friction: f32,
    pub health: i32,
    pub airborne: bool,
    pub visible: bool,
    pub collision: CollisionMode,
    pub spin: Option<SpinState>,
    pub motion: MotionAnim,
}

impl Entity {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            group: Group::Free,
            kind: BodyKind::Dynamic,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            rotation: 0.0,
            shape: Shape::Decoration,
            mass: 1.0,
            friction: 0.4,
            health: FULL_HEALTH,
            airborne: false,
            visible: true,
            collision: CollisionMode::Box,
            spin: None,
            motion: MotionAnim::Rest,
        }
    }

    // -- Builder pattern --

    pub fn with_group(mut self, group: Group) -> Self {
        self.group = group;
        self
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_collision(mut self, collision: CollisionMode) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn airborne(mut self) -> Self {
        self.airborne = true;
        self
    }

    // -- Queries --

    pub fn is_fixed(&self) -> bool {
        self.kind.is_immovable()
    }

    /// Whether the integrator should touch this body at all.
    pub fn is_simulated(&self) -> bool {
        self.group == Group::Free && self.kind == BodyKind::Dynamic && self.visible
    }

    /// Visible and with a real extent.
    pub fn can_collide(&self) -> bool {
        self.visible && self.shape.is_collider()
    }

    pub fn aabb(&self) -> Option<Aabb> {
        self.shape
            .half_extents()
            .map(|half| Aabb::new(self.pos, half))
    }

    pub fn pose(&self) -> Pose {
        Pose {
            pos: self.pos,
            rotation: self.rotation,
        }
    }

    /// Subtract damage, clamping at zero. Returns `true` if this hit killed it.
    /// A dead body is hidden for good.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if self.health <= 0 {
            return false;
        }
        self.health = (self.health - amount.max(0)).max(0);
        if self.health == 0 {
            self.visible = false;
            self.vel = Vec2::ZERO;
            self.airborne = false;
            self.spin = None;
            return true;
        }
        false
    }
}

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::animation::CompressMode;
use crate::components::entity::{BodyKind, CollisionMode, Entity, Group};
use crate::components::shape::Shape;

/// A level: every body in the world plus the scripted pieces that tie
/// them together. Loaded from a JSON file at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelManifest {
    pub bodies: Vec<BodyDesc>,
    #[serde(default)]
    pub springs: Vec<SpringDesc>,
    /// Entities the launch controller drives.
    #[serde(default)]
    pub rig: Option<RigDesc>,
}

/// One entity as authored. Positions of composite parts are offsets
/// from their parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    pub name: String,
    #[serde(default = "default_group")]
    pub group: Group,
    #[serde(default)]
    pub kind: BodyKind,
    #[serde(default = "default_shape")]
    pub shape: Shape,
    pub pos: [f32; 2],
    /// Radians.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
    #[serde(default = "default_friction")]
    pub friction: f32,
    #[serde(default)]
    pub collision: CollisionMode,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Composite root this body hangs off.
    #[serde(default)]
    pub parent: Option<String>,
    /// Shown once the parent is badly hurt.
    #[serde(default)]
    pub hurt_overlay: bool,
}

/// A spring chain, by entity name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpringDesc {
    pub trigger: String,
    pub links: Vec<SpringLinkDesc>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default = "default_depth")]
    pub depth: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpringLinkDesc {
    pub name: String,
    pub mode: CompressMode,
}

/// Launch rig, by entity name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigDesc {
    pub projectile: String,
    #[serde(default)]
    pub barrel: Option<String>,
    #[serde(default)]
    pub aim_indicator: Option<String>,
    #[serde(default)]
    pub gauge: Option<String>,
}

fn default_group() -> Group {
    Group::Free
}

fn default_shape() -> Shape {
    Shape::Decoration
}

fn default_mass() -> f32 {
    1.0
}

fn default_friction() -> f32 {
    0.4
}

fn default_visible() -> bool {
    true
}

fn default_depth() -> f32 {
    15.0
}

impl LevelManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl BodyDesc {
    pub fn new(name: impl Into<String>, group: Group, shape: Shape, pos: Vec2) -> Self {
        Self {
            name: name.into(),
            group,
            kind: BodyKind::Dynamic,
            shape,
            pos: pos.to_array(),
            rotation: 0.0,
            mass: default_mass(),
            friction: default_friction(),
            collision: CollisionMode::Box,
            visible: true,
            parent: None,
            hurt_overlay: false,
        }
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
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

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// The entity this describes. The id is assigned on spawn.
    pub fn to_entity(&self) -> Entity {
        Entity::new(EntityId(0), self.name.clone())
            .with_group(self.group)
            .with_kind(self.kind)
            .with_shape(self.shape)
            .with_pos(Vec2::from(self.pos))
            .with_rotation(self.rotation)
            .with_mass(self.mass)
            .with_friction(self.friction)
            .with_collision(self.collision)
            .with_visible(self.visible)
    }
}

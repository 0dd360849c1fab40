pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use crate::api::error::{EngineError, EngineResult};
pub use crate::api::game::{EngineContext, Game, GameConfig};
pub use crate::api::types::{event_kind, EntityId, GameEvent};
pub use crate::assets::level::{BodyDesc, LevelManifest, RigDesc, SpringDesc, SpringLinkDesc};
pub use crate::components::animation::{CompressMode, MotionAnim, RecoilProfile, SpinDirection, SpinState};
pub use crate::components::entity::{BodyKind, CollisionMode, Entity, Group, Pose, FULL_HEALTH};
pub use crate::components::shape::Shape;
pub use crate::core::collision::{Aabb, Axis, Face};
pub use crate::core::composite::CompositeGraph;
pub use crate::core::physics::{ArenaBounds, ContactEvent, MassRatios, PhysicsConfig, PhysicsWorld};
pub use crate::core::scene::Scene;
pub use crate::core::time::{Deadline, FrameClock};
pub use crate::input::intent::{Intent, LaunchSource};
pub use crate::input::queue::{InputEvent, InputQueue, BUTTON_PRIMARY, BUTTON_SECONDARY};
pub use crate::renderer::camera::{Camera2D, CameraConfig, CameraUniform};
pub use crate::renderer::instance::{PoseBuffer, PoseInstance};
pub use crate::systems::launch::{LaunchConfig, LaunchController, LaunchRig, LaunchShot, LaunchState};
pub use crate::systems::spring::{SpringChain, SpringPhase};

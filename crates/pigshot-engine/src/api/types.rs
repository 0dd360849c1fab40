use bytemuck::{Pod, Zeroable};

/// Handle to an entity in the scene arena.
///
/// Handles are dense indices assigned at authoring time. Entities are never
/// removed, so a handle stays valid for the life of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Event kinds carried in [`GameEvent::kind`].
pub mod event_kind {
    pub const LAUNCHED: f32 = 1.0;
    pub const RESET: f32 = 2.0;
    pub const COLLECTED: f32 = 3.0;
    pub const DAMAGED: f32 = 4.0;
    pub const DESTROYED: f32 = 5.0;
    pub const GOAL_REVEALED: f32 = 6.0;
}

/// A game event handed to the host each tick.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Projectile left the muzzle with velocity `(vx, vy)` at `angle_deg`.
    pub fn launched(vx: f32, vy: f32, angle_deg: f32) -> Self {
        Self { kind: event_kind::LAUNCHED, a: vx, b: vy, c: angle_deg }
    }

    pub fn reset() -> Self {
        Self { kind: event_kind::RESET, ..Self::default() }
    }

    pub fn collected(id: EntityId) -> Self {
        Self { kind: event_kind::COLLECTED, a: id.0 as f32, ..Self::default() }
    }

    pub fn damaged(id: EntityId, amount: f32, health: i32) -> Self {
        Self {
            kind: event_kind::DAMAGED,
            a: id.0 as f32,
            b: amount,
            c: health as f32,
        }
    }

    pub fn destroyed(id: EntityId) -> Self {
        Self { kind: event_kind::DESTROYED, a: id.0 as f32, ..Self::default() }
    }

    pub fn goal_revealed(id: EntityId) -> Self {
        Self { kind: event_kind::GOAL_REVEALED, a: id.0 as f32, ..Self::default() }
    }
}

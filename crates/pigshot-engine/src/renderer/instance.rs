use bytemuck::{Pod, Zeroable};

/// Shape codes written into [`PoseInstance::shape`].
pub mod shape_code {
    pub const RECT: f32 = 0.0;
    pub const CIRCLE: f32 = 1.0;
    pub const DECORATION: f32 = 2.0;
}

/// Per-entity pose record read by the host renderer.
/// 8 floats = 32 bytes stride.
///
/// Only shown entities are written; anything missing from the buffer is hidden.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PoseInstance {
    /// Entity handle.
    pub id: f32,
    /// Group index (see `Group::index`).
    pub group: f32,
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Width in world units (`-1` for decorations).
    pub width: f32,
    /// Height in world units (`-1` for decorations).
    pub height: f32,
    /// See [`shape_code`].
    pub shape: f32,
}

impl PoseInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Every shown entity's pose for the current frame.
pub struct PoseBuffer {
    pub instances: Vec<PoseInstance>,
}

impl PoseBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(128),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: PoseInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host-side reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// The buffer as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for PoseBuffer {
    fn default() -> Self {
        Self::new()
    }
}

//! Per-entity animation states.
//!
//! Each state is an explicit enum with a single `advance` transition so the
//! phase ("what am I doing") stays separate from the budget ("how much is
//! left"). Systems in `systems::animation` apply the returned steps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rotation sense of a post-impact spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinDirection {
    Clockwise,
    CounterClockwise,
}

impl SpinDirection {
    /// Sign applied to the angle (counter-clockwise is positive).
    pub fn angle_sign(self) -> f32 {
        match self {
            SpinDirection::Clockwise => -1.0,
            SpinDirection::CounterClockwise => 1.0,
        }
    }

    /// Sign of the sideways nudge that accompanies the spin.
    pub fn nudge_sign(self) -> f32 {
        -self.angle_sign()
    }
}

/// A bounded spin started by a heavy hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    pub direction: SpinDirection,
    /// Degrees left to turn.
    pub remaining_deg: f32,
}

impl SpinState {
    pub fn new(direction: SpinDirection, budget_deg: f32) -> Self {
        Self { direction, remaining_deg: budget_deg }
    }

    /// Consume one step of the budget. Returns the signed angle change in degrees.
    pub fn advance(&mut self, step_deg: f32) -> f32 {
        self.remaining_deg -= step_deg;
        self.direction.angle_sign() * step_deg
    }

    pub fn is_done(&self) -> bool {
        self.remaining_deg <= 0.0
    }
}

/// Kinematic recoil parameters: back by `offset` at `back_step` per tick,
/// then forward at `return_step` per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoilProfile {
    pub offset: f32,
    pub back_step: f32,
    pub return_step: f32,
}

impl Default for RecoilProfile {
    fn default() -> Self {
        Self {
            offset: 16.0,
            back_step: 4.0,
            return_step: 1.0,
        }
    }
}

/// How a spring-chain link deforms while compressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressMode {
    /// Moves straight down one unit per tick.
    Slide,
    /// Loses one unit of height per tick, keeping its bottom edge in place.
    Squash,
}

/// Scripted motion state of a kinematic entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MotionAnim {
    #[default]
    Rest,
    /// Moving back after a shot; `remaining` of `total` still to travel.
    RecoilBack { remaining: f32, total: f32 },
    /// Moving forward to the rest pose.
    RecoilReturn { remaining: f32 },
    /// Spring link being pressed down.
    Compress { remaining: f32, mode: CompressMode },
    /// Spring link fully pressed. Terminal.
    Compressed,
}

/// Result of one `MotionAnim::advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionStep {
    /// Translation to apply this tick.
    pub offset: Vec2,
    /// Height to remove this tick (squash links only).
    pub shrink: f32,
    /// The animation reached a resting phase on this tick.
    pub finished: bool,
}

impl MotionAnim {
    pub fn recoil(profile: &RecoilProfile) -> Self {
        MotionAnim::RecoilBack {
            remaining: profile.offset,
            total: profile.offset,
        }
    }

    pub fn compress(depth: f32, mode: CompressMode) -> Self {
        MotionAnim::Compress { remaining: depth, mode }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, MotionAnim::Rest | MotionAnim::Compressed)
    }

    /// Advance one tick and report what to apply.
    pub fn advance(&mut self, profile: &RecoilProfile) -> MotionStep {
        match *self {
            MotionAnim::Rest | MotionAnim::Compressed => MotionStep::default(),
            MotionAnim::RecoilBack { remaining, total } => {
                let step = profile.back_step.min(remaining);
                let remaining = remaining - step;
                *self = if remaining <= 0.0 {
                    MotionAnim::RecoilReturn { remaining: total }
                } else {
                    MotionAnim::RecoilBack { remaining, total }
                };
                MotionStep {
                    offset: Vec2::new(-step, 0.0),
                    ..MotionStep::default()
                }
            }
            MotionAnim::RecoilReturn { remaining } => {
                let step = profile.return_step.min(remaining);
                let remaining = remaining - step;
                let finished = remaining <= 0.0;
                *self = if finished {
                    MotionAnim::Rest
                } else {
                    MotionAnim::RecoilReturn { remaining }
                };
                MotionStep {
                    offset: Vec2::new(step, 0.0),
                    shrink: 0.0,
                    finished,
                }
            }
            MotionAnim::Compress { remaining, mode } => {
                let step = remaining.min(1.0);
                let remaining = remaining - step;
                let finished = remaining <= 0.0;
                *self = if finished {
                    MotionAnim::Compressed
                } else {
                    MotionAnim::Compress { remaining, mode }
                };
                let (offset, shrink) = match mode {
                    CompressMode::Slide => (Vec2::new(0.0, -step), 0.0),
                    CompressMode::Squash => (Vec2::new(0.0, -step / 2.0), step),
                };
                MotionStep { offset, shrink, finished }
            }
        }
    }

    /// Abort a recoil, returning the translation that restores the rest pose.
    /// Non-recoil states are left untouched.
    pub fn cancel_recoil(&mut self) -> Vec2 {
        let correction = match *self {
            MotionAnim::RecoilBack { remaining, total } => total - remaining,
            MotionAnim::RecoilReturn { remaining } => remaining,
            _ => return Vec2::ZERO,
        };
        *self = MotionAnim::Rest;
        Vec2::new(correction, 0.0)
    }
}

//! Decoded player intents.
//!
//! The engine never interprets raw keys or buttons. A game maps its
//! [`InputEvent`](super::queue::InputEvent)s to these and hands them to
//! `EngineContext::apply`.

use glam::Vec2;

/// Which adapter is aiming the current shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchSource {
    /// Held key: power charges over time, angle steps in fixed increments.
    Keyboard,
    /// Press and drag: power and angle follow the cursor offset from the pivot.
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Start charging a shot.
    LaunchBegin(LaunchSource),
    /// Cursor position in world space (pointer aiming).
    Aim(Vec2),
    /// Raise (positive) or lower (negative) keyboard power by whole steps.
    PowerStep(i32),
    /// Raise or lower the keyboard launch angle by whole steps.
    AngleStep(i32),
    /// Release the shot.
    LaunchEnd,
    /// Move the camera by a world-space delta.
    Pan(Vec2),
    /// Zoom in (positive) or out (negative) by whole steps.
    Zoom(i32),
    /// Put the projectile and cannon back at rest.
    Reset,
}

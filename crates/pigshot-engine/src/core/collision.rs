//! Collision detection: axis-aligned boxes with directional face tests,
//! plus the center-distance sphere test.
//!
//! Plain overlap cannot say which face was struck once two boxes
//! interpenetrate. Each directional predicate therefore also requires the
//! candidate's center to lie ahead of the mover along the direction of
//! travel. This is exact only for single-axis motion, which is why the
//! integrator moves one axis at a time.

use glam::Vec2;

use crate::api::error::{EngineError, EngineResult};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Strict overlap: boxes that merely touch do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.bottom() < other.top()
            && self.top() > other.bottom()
    }

    pub fn translated(&self, by: Vec2) -> Aabb {
        Aabb::new(self.center + by, self.half)
    }
}

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    pub fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }

    pub fn unit(self, amount: f32) -> Vec2 {
        match self {
            Axis::X => Vec2::new(amount, 0.0),
            Axis::Y => Vec2::new(0.0, amount),
        }
    }
}

/// The side of the mover that leads in the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Right,
    Left,
    Top,
    Bottom,
}

impl Face {
    /// Face implied by a single-axis displacement. Zero displacement has none.
    pub fn of_motion(axis: Axis, delta: f32) -> Option<Face> {
        match axis {
            Axis::X if delta > 0.0 => Some(Face::Right),
            Axis::X if delta < 0.0 => Some(Face::Left),
            Axis::Y if delta > 0.0 => Some(Face::Top),
            Axis::Y if delta < 0.0 => Some(Face::Bottom),
            _ => None,
        }
    }

    /// Mover center coordinate that puts it flush against `candidate` on this face.
    pub fn contact_coordinate(self, candidate: &Aabb, mover_half: Vec2) -> f32 {
        match self {
            Face::Right => candidate.left() - mover_half.x,
            Face::Left => candidate.right() + mover_half.x,
            Face::Top => candidate.bottom() - mover_half.y,
            Face::Bottom => candidate.top() + mover_half.y,
        }
    }
}

/// Candidate overlaps the mover and lies to its right.
pub fn approaching_right(candidate: &Aabb, mover: &Aabb) -> bool {
    candidate.center.x > mover.center.x && candidate.overlaps(mover)
}

/// Candidate overlaps the mover and lies to its left.
pub fn approaching_left(candidate: &Aabb, mover: &Aabb) -> bool {
    candidate.center.x < mover.center.x && candidate.overlaps(mover)
}

/// Candidate overlaps the mover and lies above it.
pub fn approaching_top(candidate: &Aabb, mover: &Aabb) -> bool {
    candidate.center.y > mover.center.y && candidate.overlaps(mover)
}

/// Candidate overlaps the mover and lies below it.
pub fn approaching_bottom(candidate: &Aabb, mover: &Aabb) -> bool {
    candidate.center.y < mover.center.y && candidate.overlaps(mover)
}

/// Dispatch to the directional predicate for `face`.
pub fn hits_face(face: Face, candidate: &Aabb, mover: &Aabb) -> bool {
    match face {
        Face::Right => approaching_right(candidate, mover),
        Face::Left => approaching_left(candidate, mover),
        Face::Top => approaching_top(candidate, mover),
        Face::Bottom => approaching_bottom(candidate, mover),
    }
}

/// Center-distance test: strictly closer than the sum of radii.
pub fn spheres_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Reduce a displacement to the single axis it moves along.
///
/// `Ok(None)` for no motion; an error if both axes are non-zero.
pub fn single_axis(dx: f32, dy: f32) -> EngineResult<Option<(Axis, f32)>> {
    match (dx != 0.0, dy != 0.0) {
        (true, true) => Err(EngineError::InvalidAxisCombination { dx, dy }),
        (true, false) => Ok(Some((Axis::X, dx))),
        (false, true) => Ok(Some((Axis::Y, dy))),
        (false, false) => Ok(None),
    }
}

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Geometric extent of a sprite.
///
/// Only `Rect` and `Circle` take part in collision. `Decoration` is render-only
/// (drawn triangles, outlines) and is never tested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
    Decoration,
}

impl Shape {
    pub fn rect(width: f32, height: f32) -> Self {
        Shape::Rect { width, height }
    }

    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    /// Half extents of the axis-aligned box. Circles use their bounding square.
    pub fn half_extents(&self) -> Option<Vec2> {
        match *self {
            Shape::Rect { width, height } => Some(Vec2::new(width / 2.0, height / 2.0)),
            Shape::Circle { radius } => Some(Vec2::splat(radius)),
            Shape::Decoration => None,
        }
    }

    /// Radius used by the sphere collision path.
    /// Rectangles use half their diagonal.
    pub fn bounding_radius(&self) -> Option<f32> {
        match *self {
            Shape::Rect { width, height } => Some((width * width + height * height).sqrt() / 2.0),
            Shape::Circle { radius } => Some(radius),
            Shape::Decoration => None,
        }
    }

    pub fn is_collider(&self) -> bool {
        !matches!(self, Shape::Decoration)
    }

    /// Width/height pair, `(-1, -1)` for decorations.
    pub fn size(&self) -> Vec2 {
        self.half_extents().map(|h| h * 2.0).unwrap_or(Vec2::splat(-1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_extent_is_bounding_square() {
        assert_eq!(Shape::circle(15.0).half_extents(), Some(Vec2::splat(15.0)));
    }

    #[test]
    fn decoration_has_no_extent() {
        let s = Shape::Decoration;
        assert!(!s.is_collider());
        assert_eq!(s.half_extents(), None);
        assert_eq!(s.size(), Vec2::splat(-1.0));
    }

    #[test]
    fn rect_radius_is_half_diagonal() {
        let r = Shape::rect(30.0, 40.0).bounding_radius().unwrap();
        assert!((r - 25.0).abs() < 1e-5);
    }

    #[test]
    fn parses_tagged_json() {
        let s: Shape = serde_json::from_str(r#"{ "kind": "rect", "width": 40, "height": 20 }"#).unwrap();
        assert_eq!(s, Shape::rect(40.0, 20.0));
    }
}

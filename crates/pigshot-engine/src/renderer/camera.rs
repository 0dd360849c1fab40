use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom and pan limits for the world view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Half width and half height of the world rectangle, in world units.
    pub half_extents: [f32; 2],
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Multiplier applied per zoom step.
    pub zoom_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            half_extents: [400.0, 300.0],
            min_zoom: 1.0,
            max_zoom: 4.0,
            zoom_factor: 1.1,
        }
    }
}

/// Orthographic camera over a fixed world rectangle centered on the origin.
///
/// At zoom 1 the whole world is visible. Zooming shrinks the visible window,
/// and panning moves it, but the window never leaves the world rectangle.
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub config: CameraConfig,
    pub zoom: f32,
    /// Camera center position in world space.
    pub center: Vec2,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
}

impl Camera2D {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            zoom: config.min_zoom,
            center: Vec2::ZERO,
        }
    }

    fn world_half(&self) -> Vec2 {
        Vec2::from(self.config.half_extents)
    }

    /// Half size of the currently visible window.
    pub fn visible_half(&self) -> Vec2 {
        self.world_half() / self.zoom
    }

    /// Build an orthographic projection matrix.
    /// Origin at center, Y-up, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        let half = self.visible_half();
        let min = self.center - half;
        let max = self.center + half;
        Mat4::orthographic_rh(min.x, max.x, min.y, max.y, 0.0, 1.0)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }

    /// Move the view by a world-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.center += delta;
        self.clamp_to_world();
    }

    /// Zoom by whole steps: positive zooms in, negative zooms out.
    pub fn zoom_by(&mut self, steps: i32) {
        let factor = self.config.zoom_factor.powi(steps);
        self.zoom = (self.zoom * factor).clamp(self.config.min_zoom, self.config.max_zoom);
        self.clamp_to_world();
    }

    fn clamp_to_world(&mut self) {
        let slack = (self.world_half() - self.visible_half()).max(Vec2::ZERO);
        self.center = self.center.clamp(-slack, slack);
    }

    /// Map a point in normalized view coordinates (`[-1, 1]` on both axes)
    /// to world space.
    pub fn view_to_world(&self, ndc: Vec2) -> Vec2 {
        self.center + ndc * self.visible_half()
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_matrix_is_orthographic() {
        let cam = Camera2D::default();
        let cols = cam.projection_matrix().to_cols_array_2d();
        assert!((cols[3][3] - 1.0).abs() < 1e-6);
        // World edge maps to the clip edge at zoom 1.
        let edge = cam.projection_matrix().transform_point3(glam::Vec3::new(400.0, 300.0, 0.0));
        assert!((edge.x - 1.0).abs() < 1e-6);
        assert!((edge.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cannot_pan_at_full_view() {
        let mut cam = Camera2D::default();
        cam.pan(Vec2::new(50.0, -20.0));
        assert_eq!(cam.center, Vec2::ZERO);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera2D::default();
        cam.zoom_by(-3);
        assert_eq!(cam.zoom, 1.0);
        cam.zoom_by(100);
        assert_eq!(cam.zoom, 4.0);
        cam.zoom_by(-1);
        assert!((cam.zoom - 4.0 / 1.1).abs() < 1e-5);
    }

    #[test]
    fn pan_stays_inside_world() {
        let mut cam = Camera2D::default();
        cam.zoom_by(100);
        cam.pan(Vec2::new(1000.0, -1000.0));
        // Visible half is (100, 75) at zoom 4.
        assert!((cam.center.x - 300.0).abs() < 1e-4);
        assert!((cam.center.y + 225.0).abs() < 1e-4);
    }

    #[test]
    fn zooming_out_recenters_into_world() {
        let mut cam = Camera2D::default();
        cam.zoom_by(100);
        cam.pan(Vec2::new(1000.0, 0.0));
        cam.zoom_by(-100);
        assert_eq!(cam.center, Vec2::ZERO);
    }

    #[test]
    fn view_to_world_follows_zoom() {
        let mut cam = Camera2D::default();
        assert_eq!(cam.view_to_world(Vec2::new(1.0, -1.0)), Vec2::new(400.0, -300.0));
        cam.zoom_by(100);
        assert_eq!(cam.view_to_world(Vec2::new(1.0, 0.0)), Vec2::new(100.0, 0.0));
    }
}

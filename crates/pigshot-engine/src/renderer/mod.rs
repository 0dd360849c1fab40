pub mod camera;
pub mod instance;

pub use camera::{Camera2D, CameraConfig, CameraUniform};
pub use instance::{PoseBuffer, PoseInstance};

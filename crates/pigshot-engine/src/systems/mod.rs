pub mod animation;
pub mod launch;
pub mod render;
pub mod spring;

pub mod collision;
pub mod composite;
pub mod physics;
pub mod scene;
pub mod time;

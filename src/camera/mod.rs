//! Camera module: orbit control, target following and viewport resizing.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::CameraPlugin;

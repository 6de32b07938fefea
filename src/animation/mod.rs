//! Animation stepper: fixed per-frame spin and orbit increments.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::AnimationPlugin;

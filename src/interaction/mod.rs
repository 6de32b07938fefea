//! Interaction resolver: hover highlighting, body selection and playback toggling.
pub mod components;
pub mod picking;
pub mod plugin;
pub mod systems;

pub use plugin::InteractionPlugin;

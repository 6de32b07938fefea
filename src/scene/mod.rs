//! Scene builder: turns the body registry into the render hierarchy.
pub mod builder;
pub mod components;
pub mod plugin;
pub mod settings;

#[cfg(test)]
pub mod testing;

pub use plugin::ScenePlugin;

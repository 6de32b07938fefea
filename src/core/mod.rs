//! Core module housing the frame pipeline shared by every other plugin.
pub mod plugin;

pub use plugin::{CorePlugin, FrameStage};

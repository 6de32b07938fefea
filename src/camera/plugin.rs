//! CameraPlugin wires the orbit camera, its input and the camera director.
use bevy::prelude::*;

use crate::{
    camera::systems::{
        apply_viewport_resize, commit_orbit_camera, follow_target, orbit_camera_input,
        spawn_orbit_camera,
    },
    core::FrameStage,
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_orbit_camera)
            .add_systems(
                Update,
                (apply_viewport_resize, orbit_camera_input).in_set(FrameStage::Input),
            )
            .add_systems(
                Update,
                (follow_target, commit_orbit_camera)
                    .chain()
                    .in_set(FrameStage::Direct),
            );
    }
}

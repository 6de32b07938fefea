use bevy::{
    prelude::*,
    render::{
        settings::{RenderCreation, WgpuFeatures, WgpuSettings},
        RenderPlugin,
    },
};

mod animation;
mod bodies;
mod camera;
mod core;
mod interaction;
mod scene;

use crate::{
    animation::AnimationPlugin, camera::CameraPlugin, core::CorePlugin,
    interaction::InteractionPlugin, scene::ScenePlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Orrery".into(),
                        ..default()
                    }),
                    ..default()
                })
                // Line polygon mode backs the wireframe overlay.
                .set(RenderPlugin {
                    render_creation: RenderCreation::Automatic(WgpuSettings {
                        features: WgpuFeatures::POLYGON_MODE_LINE,
                        ..default()
                    }),
                    ..default()
                }),
            CorePlugin,
            ScenePlugin,
            AnimationPlugin,
            InteractionPlugin,
            CameraPlugin,
        ))
        .run();
}

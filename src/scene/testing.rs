//! Headless app fixture shared by the ECS tests.
use bevy::prelude::*;

use crate::{
    bodies::BodyRegistry,
    scene::{builder::spawn_solar_system, settings::SceneSettings},
};

/// App with the default solar system already built, without any renderer.
pub fn solar_system_app() -> App {
    solar_system_app_with(SceneSettings::default())
}

pub fn solar_system_app_with(settings: SceneSettings) -> App {
    let mut app = App::new();
    app.init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .insert_resource(BodyRegistry::default_solar_system().expect("valid defaults"))
        .insert_resource(settings)
        .add_systems(Startup, spawn_solar_system);
    app.update();
    app
}

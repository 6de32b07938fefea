//! ScenePlugin loads the body registry and builds the solar system at startup.
use bevy::{pbr::wireframe::WireframePlugin, prelude::*};

use crate::{
    bodies::{BodyId, BodyRegistry, RegistryError},
    scene::{builder::spawn_solar_system, components::BodyHandles, settings::SceneSettings},
};

/// Holds the configuration error that prevents the scene from being built.
#[derive(Resource, Debug)]
struct InvalidBodyConfig(RegistryError);

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        let settings = SceneSettings::load_or_default();
        let shadows = if settings.lighting.shadows_enabled {
            "on"
        } else {
            "off"
        };
        if settings.meshes.wireframe {
            app.add_plugins(WireframePlugin::default());
        }
        app.insert_resource(ClearColor(Color::BLACK))
            .insert_resource(settings)
            .init_resource::<BodyHandles>();

        match BodyRegistry::load_or_default() {
            Ok(registry) => {
                let ids: Vec<&str> = registry.ids().map(BodyId::as_str).collect();
                info!(
                    "Scene configured: {} bodies ({}), shadows {}",
                    registry.len(),
                    ids.join(", "),
                    shadows
                );
                app.insert_resource(registry)
                    .add_systems(Startup, spawn_solar_system);
            }
            Err(err) => {
                error!("Invalid body configuration: {}", err);
                app.insert_resource(InvalidBodyConfig(err))
                    .add_systems(Startup, abort_on_invalid_config);
            }
        }
    }
}

/// Fails startup; the default error handler turns this into a fatal error.
fn abort_on_invalid_config(invalid: Res<InvalidBodyConfig>) -> Result {
    Err(invalid.0.clone().into())
}

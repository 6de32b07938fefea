//! Builds the render hierarchy for every registered body.
use std::f32::consts::FRAC_PI_2;

use bevy::{
    ecs::system::EntityCommands, light::NotShadowCaster, pbr::wireframe::Wireframe, prelude::*,
};

use crate::{
    animation::components::Spin,
    bodies::{
        descriptor::{MoonDescriptor, RingDescriptor},
        BodyDescriptor, BodyRegistry, RegistryError,
    },
    scene::{
        components::{Body, BodyHandle, BodyHandles, Moon, OrbitPivot, PlanetRing, Selectable, Sun},
        settings::{MeshSettings, SceneSettings},
    },
};

/// Marker for the point light sitting inside the sun.
#[derive(Component, Debug, Default)]
pub struct SunLight;

/// Startup system: spawns the solar system and publishes its handles.
pub fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    registry: Res<BodyRegistry>,
    settings: Res<SceneSettings>,
) -> Result {
    let handles = build_solar_system(
        &mut commands,
        &mut meshes,
        &mut materials,
        registry.descriptors(),
        &settings,
    )?;

    info!(
        "Solar system built: {} bodies, {} ringed, {} with moons",
        handles.len(),
        handles.iter().filter(|(_, handle)| handle.ring.is_some()).count(),
        handles.iter().filter(|(_, handle)| handle.moon.is_some()).count(),
    );

    commands.insert_resource(handles);
    Ok(())
}

/// Spawns meshes, pivots, rings, moons and lights for `descriptors`.
///
/// Every descriptor is validated before anything is spawned, so a failed
/// build leaves the world untouched.
pub fn build_solar_system(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    descriptors: &[BodyDescriptor],
    settings: &SceneSettings,
) -> Result<BodyHandles, RegistryError> {
    for descriptor in descriptors {
        descriptor.validate()?;
    }

    let mut handles = BodyHandles::default();
    for descriptor in descriptors {
        let handle = if descriptor.is_sun() {
            spawn_sun(commands, meshes, materials, descriptor, settings)
        } else {
            spawn_planet(commands, meshes, materials, descriptor, settings)
        };
        handles.insert(descriptor.id.clone(), handle);
    }

    spawn_lights(commands, settings);

    Ok(handles)
}

fn spawn_sun(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    descriptor: &BodyDescriptor,
    settings: &SceneSettings,
) -> BodyHandle {
    let material = materials.add(StandardMaterial {
        base_color: descriptor.color,
        emissive: LinearRgba::from(descriptor.color) * settings.lighting.sun_glow,
        ..default()
    });

    let sun = commands.spawn((
        Mesh3d(meshes.add(sphere_mesh(descriptor.radius, &settings.meshes))),
        MeshMaterial3d(material),
        Transform::default(),
        Spin::new(descriptor.self_spin_rate),
        Body,
        Sun,
        Selectable {
            owner: descriptor.id.clone(),
        },
        NotShadowCaster,
        Name::new(descriptor.id.to_string()),
    ));
    let mesh = finish_mesh(sun, &settings.meshes);

    BodyHandle {
        mesh,
        pivot: None,
        ring: None,
        moon: None,
    }
}

fn spawn_planet(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    descriptor: &BodyDescriptor,
    settings: &SceneSettings,
) -> BodyHandle {
    let pivot = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            OrbitPivot,
            Spin::new(descriptor.orbit_spin_rate),
            Name::new(format!("{} orbit", descriptor.id)),
        ))
        .id();

    let material = materials.add(StandardMaterial {
        base_color: descriptor.color,
        perceptual_roughness: 0.8,
        ..default()
    });

    let planet = commands.spawn((
        Mesh3d(meshes.add(sphere_mesh(descriptor.radius, &settings.meshes))),
        MeshMaterial3d(material),
        Transform::from_xyz(descriptor.orbit_distance, 0.0, 0.0),
        Spin::new(descriptor.self_spin_rate),
        Body,
        Selectable {
            owner: descriptor.id.clone(),
        },
        Name::new(descriptor.id.to_string()),
        ChildOf(pivot),
    ));
    let mesh = finish_mesh(planet, &settings.meshes);

    let ring = descriptor
        .ring()
        .map(|ring| spawn_ring(commands, meshes, materials, descriptor, ring, pivot, settings));
    let moon = descriptor
        .moon()
        .map(|moon| spawn_moon(commands, meshes, materials, descriptor, moon, mesh, settings));

    BodyHandle {
        mesh,
        pivot: Some(pivot),
        ring,
        moon,
    }
}

/// The ring shares the planet's pivot, so it orbits with the planet but does
/// not take part in the planet's own spin.
fn spawn_ring(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    descriptor: &BodyDescriptor,
    ring: &RingDescriptor,
    pivot: Entity,
    settings: &SceneSettings,
) -> Entity {
    let annulus = Annulus::new(ring.inner_radius, ring.outer_radius)
        .mesh()
        .resolution(settings.meshes.ring_resolution)
        .build();

    let entity = commands.spawn((
        Mesh3d(meshes.add(annulus)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: ring.color,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_xyz(descriptor.orbit_distance, 0.0, 0.0)
            .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        PlanetRing,
        Selectable {
            owner: descriptor.id.clone(),
        },
        Name::new(format!("{} ring", descriptor.id)),
        ChildOf(pivot),
    ));
    finish_mesh(entity, &settings.meshes)
}

/// The moon hangs off the planet mesh and circles it by inheriting its spin.
fn spawn_moon(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    descriptor: &BodyDescriptor,
    moon: &MoonDescriptor,
    planet: Entity,
    settings: &SceneSettings,
) -> Entity {
    let entity = commands.spawn((
        Mesh3d(meshes.add(sphere_mesh(moon.radius, &settings.meshes))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: moon.color,
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(moon.distance, 0.0, 0.0),
        Moon,
        Selectable {
            owner: descriptor.id.clone(),
        },
        Name::new(format!("{} moon", descriptor.id)),
        ChildOf(planet),
    ));
    finish_mesh(entity, &settings.meshes)
}

fn spawn_lights(commands: &mut Commands, settings: &SceneSettings) {
    let lighting = &settings.lighting;

    commands.spawn((
        PointLight {
            intensity: lighting.point_intensity,
            range: lighting.point_range,
            shadows_enabled: lighting.shadows_enabled,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
        SunLight,
        Name::new("Sun light"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: lighting.directional_illuminance,
            shadows_enabled: lighting.shadows_enabled,
            ..default()
        },
        Transform::from_translation(lighting.directional_position).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Fill light"),
    ));

    commands.insert_resource(AmbientLight {
        color: lighting.ambient_color,
        brightness: lighting.ambient_brightness,
        ..default()
    });
}

/// Adds the wireframe overlay when enabled and returns the entity.
fn finish_mesh(mut entity: EntityCommands, settings: &MeshSettings) -> Entity {
    if settings.wireframe {
        entity.insert(Wireframe);
    }
    entity.id()
}

fn sphere_mesh(radius: f32, settings: &MeshSettings) -> Mesh {
    Sphere::new(radius)
        .mesh()
        .uv(settings.sphere_sectors, settings.sphere_stacks)
}

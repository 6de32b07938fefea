//! Systems for the orbit camera and the camera director.
use bevy::{
    ecs::message::MessageReader,
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
    window::WindowResized,
};

use crate::{
    camera::components::OrbitCamera,
    interaction::components::InteractionState,
    scene::{components::BodyHandles, settings::SceneSettings},
};

/// Scroll distance in pixels treated as one wheel line.
const PIXELS_PER_LINE: f32 = 100.0;

/// Spawns the perspective camera with its orbit control, focused on the origin.
pub fn spawn_orbit_camera(mut commands: Commands, settings: Res<SceneSettings>) {
    let camera = &settings.camera;

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov,
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Transform::from_translation(camera.position).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::new(Vec3::ZERO)
            .with_sensitivity(camera.rotate_sensitivity, camera.zoom_sensitivity)
            .with_zoom_limits(camera.min_radius, camera.max_radius),
        Name::new("Orbit camera"),
    ));
}

/// Queues right-drag rotation and wheel zoom on every orbit camera.
pub fn orbit_camera_input(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_events: MessageReader<MouseMotion>,
    mut wheel_events: MessageReader<MouseWheel>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let mut drag = Vec2::ZERO;
    for ev in motion_events.read() {
        drag += ev.delta;
    }
    let mut scroll = 0.0;
    for ev in wheel_events.read() {
        scroll += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        };
    }

    let rotating = mouse_buttons.pressed(MouseButton::Right) && drag != Vec2::ZERO;
    if !rotating && scroll == 0.0 {
        return;
    }

    for mut camera in cameras.iter_mut() {
        if rotating {
            camera.queue_rotation(drag);
        }
        if scroll != 0.0 {
            camera.queue_zoom(scroll);
        }
    }
}

/// Moves the focal point onto the selected body's current world position.
///
/// Runs after the animation step, so the position already includes this
/// frame's rotation. Without a target the focal point is left where it is.
pub fn follow_target(
    state: Res<InteractionState>,
    handles: Res<BodyHandles>,
    nodes: Query<(&Transform, Option<&ChildOf>), Without<OrbitCamera>>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let Some(target) = state.target() else {
        return;
    };
    let Some(handle) = handles.get(target) else {
        return;
    };
    let Some(position) = world_position(handle.mesh, &nodes) else {
        return;
    };

    for mut camera in cameras.iter_mut() {
        camera.set_focus(position);
    }
}

/// Commits focus changes and queued input to the camera transform.
pub fn commit_orbit_camera(mut cameras: Query<(&mut OrbitCamera, &mut Transform)>) {
    for (mut camera, mut transform) in cameras.iter_mut() {
        camera.update(&mut transform);
    }
}

/// Re-applies the aspect ratio after the window has been resized.
pub fn apply_viewport_resize(
    mut resized: MessageReader<WindowResized>,
    mut projections: Query<&mut Projection, With<OrbitCamera>>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };

    for mut projection in projections.iter_mut() {
        reproject(&mut projection, last.width, last.height);
    }
    debug!("Viewport resized to {}x{}", last.width, last.height);
}

/// Sets a perspective projection's aspect ratio for a `width` x `height` surface.
pub fn reproject(projection: &mut Projection, width: f32, height: f32) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    if let Projection::Perspective(perspective) = projection {
        perspective.aspect_ratio = width / height;
    }
}

/// Composes local transforms up the parent chain.
///
/// Used instead of `GlobalTransform`, which is only propagated after `Update`.
pub fn world_position(
    entity: Entity,
    nodes: &Query<(&Transform, Option<&ChildOf>), Without<OrbitCamera>>,
) -> Option<Vec3> {
    let (transform, child_of) = nodes.get(entity).ok()?;
    let mut world = *transform;
    let mut parent = child_of.map(ChildOf::parent);

    while let Some(entity) = parent {
        let (transform, child_of) = nodes.get(entity).ok()?;
        world = transform.mul_transform(world);
        parent = child_of.map(ChildOf::parent);
    }

    Some(world.translation)
}

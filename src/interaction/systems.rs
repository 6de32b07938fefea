//! Systems translating pointer and keyboard input into hover and selection state.
use bevy::{
    picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings},
    prelude::*,
    window::PrimaryWindow,
};

use crate::{
    bodies::BodyRegistry,
    camera::components::OrbitCamera,
    interaction::{
        components::{InteractionState, PointerPosition, ReleaseTarget, SelectBody},
        picking::{ndc_from_cursor, nearest_surface, pick_ray},
    },
    scene::{components::Selectable, settings::SceneSettings},
};

/// Number keys address bodies: `0` the sun, `1`..`9` the planets in registry order.
const BODY_KEYS: [KeyCode; 10] = [
    KeyCode::Digit0,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Samples the cursor of the primary window in normalized device coordinates.
pub fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerPosition>,
) {
    let ndc = windows.single().ok().and_then(|window| {
        window
            .cursor_position()
            .and_then(|cursor| ndc_from_cursor(cursor, window.size()))
    });
    if pointer.ndc != ndc {
        pointer.ndc = ndc;
    }
}

/// Turns a left click on the highlighted object into a selection of its body.
pub fn emit_click_selection(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    state: Res<InteractionState>,
    selectable: Query<&Selectable>,
    mut selections: MessageWriter<SelectBody>,
) {
    if !mouse_buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(hovered) = state.hovered_entity() else {
        return;
    };
    if let Ok(part) = selectable.get(hovered) {
        selections.write(SelectBody::new(part.owner.as_str()));
    }
}

/// Number keys select bodies; `Escape` stops following the current target.
pub fn emit_keyboard_selection(
    keyboard: Res<ButtonInput<KeyCode>>,
    registry: Res<BodyRegistry>,
    mut selections: MessageWriter<SelectBody>,
    mut releases: MessageWriter<ReleaseTarget>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        releases.write(ReleaseTarget);
    }

    for (index, key) in BODY_KEYS.iter().enumerate() {
        if !keyboard.just_pressed(*key) {
            continue;
        }
        let body = if index == 0 {
            Some(registry.sun())
        } else {
            registry.planets().nth(index - 1)
        };
        if let Some(body) = body {
            selections.write(SelectBody::new(body.id.as_str()));
        }
    }
}

/// `Space` pauses and resumes the animation.
pub fn toggle_playback(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<InteractionState>) {
    if keyboard.just_pressed(KeyCode::Space) {
        let playing = state.toggle_playing();
        info!("Animation {}", if playing { "resumed" } else { "paused" });
    }
}

/// Applies selection requests, ignoring ids the registry does not know.
pub fn apply_body_selection(
    mut selections: MessageReader<SelectBody>,
    mut releases: MessageReader<ReleaseTarget>,
    registry: Res<BodyRegistry>,
    mut state: ResMut<InteractionState>,
) {
    for _ in releases.read() {
        if let Some(previous) = state.release_target() {
            info!("Camera released from {}", previous);
        }
    }

    for request in selections.read() {
        let Some(id) = registry.resolve(&request.element_id) else {
            debug!("Ignoring selection of unknown body '{}'", request.element_id);
            continue;
        };
        if state.select(id.clone()) {
            info!("Camera target set to {}", id);
        }
    }
}

/// Highlights the nearest object under the pointer, restoring the previous one.
pub fn resolve_hover(
    pointer: Res<PointerPosition>,
    settings: Res<SceneSettings>,
    cameras: Query<(&Camera, &GlobalTransform), With<OrbitCamera>>,
    mut ray_cast: MeshRayCast,
    surfaces: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut state: ResMut<InteractionState>,
) {
    let ray = pointer.ndc.and_then(|ndc| {
        let (camera, camera_transform) = cameras.single().ok()?;
        pick_ray(camera, camera_transform, ndc)
    });

    let next = ray.and_then(|ray| {
        nearest_surface(
            &mut ray_cast,
            &surfaces,
            ray,
            &MeshRayCastSettings::default(),
        )
    });

    state.hover(next, &mut materials, settings.highlight);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::BodyId;

    fn selection_app() -> App {
        let mut app = App::new();
        app.insert_resource(BodyRegistry::default_solar_system().expect("valid defaults"))
            .init_resource::<InteractionState>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_message::<SelectBody>()
            .add_message::<ReleaseTarget>()
            .add_systems(
                Update,
                (emit_keyboard_selection, toggle_playback, apply_body_selection).chain(),
            );
        app
    }

    fn target(app: &App) -> Option<String> {
        app.world()
            .resource::<InteractionState>()
            .target()
            .map(|id| id.as_str().to_string())
    }

    #[test]
    fn valid_ids_become_the_target() {
        let mut app = selection_app();
        app.world_mut().write_message(SelectBody::new("earth"));
        app.update();

        assert_eq!(target(&app).as_deref(), Some("earth"));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut app = selection_app();
        app.world_mut().write_message(SelectBody::new("saturn"));
        app.update();

        app.world_mut().write_message(SelectBody::new("moon-base"));
        app.update();

        assert_eq!(target(&app).as_deref(), Some("saturn"));
    }

    #[test]
    fn number_keys_address_bodies_in_registry_order() {
        let mut app = selection_app();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Digit3);
        app.update();
        assert_eq!(target(&app).as_deref(), Some("earth"));

        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.clear();
        keyboard.release(KeyCode::Digit3);
        keyboard.press(KeyCode::Digit0);
        app.update();
        assert_eq!(target(&app).as_deref(), Some("sun"));
    }

    #[test]
    fn escape_releases_and_space_pauses() {
        let mut app = selection_app();
        app.world_mut().write_message(SelectBody::new("mars"));
        app.update();

        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.press(KeyCode::Escape);
        keyboard.press(KeyCode::Space);
        app.update();

        let state = app.world().resource::<InteractionState>();
        assert!(state.target().is_none());
        assert!(!state.playing);
    }

    #[test]
    fn pointer_tracks_the_primary_window_cursor() {
        let mut app = App::new();
        app.init_resource::<PointerPosition>()
            .add_systems(Update, track_pointer);
        let window = app.world_mut().spawn((Window::default(), PrimaryWindow)).id();

        let place_cursor = |app: &mut App, cursor: Option<Vec2>| {
            app.world_mut()
                .get_mut::<Window>(window)
                .expect("window")
                .set_cursor_position(cursor);
            app.update();
            app.world().resource::<PointerPosition>().ndc
        };

        // Default window is 1280 x 720 logical pixels.
        assert_eq!(place_cursor(&mut app, Some(Vec2::new(640.0, 360.0))), Some(Vec2::ZERO));
        assert_eq!(
            place_cursor(&mut app, Some(Vec2::new(320.0, 540.0))),
            Some(Vec2::new(-0.5, -0.5))
        );
        assert_eq!(place_cursor(&mut app, None), None);
    }

    #[test]
    fn click_selects_the_owner_of_the_hovered_part() {
        let mut app = crate::scene::testing::solar_system_app();
        app.init_resource::<InteractionState>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_message::<SelectBody>()
            .add_message::<ReleaseTarget>()
            .add_systems(Update, (emit_click_selection, apply_body_selection).chain());

        let (ring, material) = {
            let world = app.world();
            let handles = world.resource::<crate::scene::components::BodyHandles>();
            let ring = handles
                .get(&BodyId::new("saturn"))
                .and_then(|handle| handle.ring)
                .expect("saturn ring");
            let material = world
                .get::<MeshMaterial3d<StandardMaterial>>(ring)
                .expect("ring material")
                .0
                .id();
            (ring, material)
        };

        app.world_mut()
            .resource_scope(|world, mut materials: Mut<Assets<StandardMaterial>>| {
                world.resource_mut::<InteractionState>().hover(
                    Some((ring, material)),
                    &mut materials,
                    LinearRgba::RED,
                );
            });
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();

        assert_eq!(target(&app).as_deref(), Some("saturn"));
    }
}

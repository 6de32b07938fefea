//! Pointer coordinate conversion, pick-ray construction and nearest-hit lookup.
use bevy::{
    picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings},
    prelude::*,
};

/// Converts a window cursor position (logical pixels, origin top-left) into
/// normalized device coordinates in `[-1, 1]` with +Y up.
pub fn ndc_from_cursor(cursor: Vec2, window_size: Vec2) -> Option<Vec2> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    let ndc = Vec2::new(
        cursor.x / window_size.x * 2.0 - 1.0,
        1.0 - cursor.y / window_size.y * 2.0,
    );
    Some(ndc.clamp(Vec2::splat(-1.0), Vec2::ONE))
}

/// Ray from the camera's near plane through the pointer.
///
/// The pointer is stored in NDC rather than viewport pixels, so the ray is
/// unprojected through the camera's clip matrix directly instead of going
/// through `Camera::viewport_to_world`.
pub fn pick_ray(camera: &Camera, camera_transform: &GlobalTransform, ndc: Vec2) -> Option<Ray3d> {
    let world_from_clip = Mat4::from(camera_transform.affine()) * camera.clip_from_view().inverse();
    ray_through(world_from_clip, ndc)
}

/// Unprojects `ndc` at the near plane and at a far depth.
///
/// Bevy projections are reverse-z: depth 1 is the near plane and depth 0 is
/// infinitely far, so the far point uses the smallest positive depth.
pub fn ray_through(world_from_clip: Mat4, ndc: Vec2) -> Option<Ray3d> {
    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Nearest mesh along `ray` together with its material, if it has one.
pub fn nearest_surface(
    ray_cast: &mut MeshRayCast,
    surfaces: &Query<&MeshMaterial3d<StandardMaterial>>,
    ray: Ray3d,
    settings: &MeshRayCastSettings,
) -> Option<(Entity, AssetId<StandardMaterial>)> {
    let (entity, _) = ray_cast.cast_ray(ray, settings).first()?;
    surfaces
        .get(*entity)
        .ok()
        .map(|material| (*entity, material.0.id()))
}

#[cfg(test)]
mod tests {
    use bevy::{
        camera::primitives::Aabb, ecs::system::RunSystemOnce,
        picking::mesh_picking::ray_cast::RayCastVisibility,
    };

    use super::*;
    use crate::interaction::components::InteractionState;

    const ATTENTION: LinearRgba = LinearRgba::RED;

    #[test]
    fn cursor_maps_to_ndc_corners() {
        let size = Vec2::new(800.0, 600.0);

        assert_eq!(ndc_from_cursor(Vec2::ZERO, size), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(ndc_from_cursor(size, size), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(
            ndc_from_cursor(Vec2::new(400.0, 300.0), size),
            Some(Vec2::ZERO)
        );
        assert_eq!(
            ndc_from_cursor(Vec2::new(200.0, 450.0), size),
            Some(Vec2::new(-0.5, -0.5))
        );
    }

    #[test]
    fn degenerate_window_has_no_pointer() {
        assert_eq!(ndc_from_cursor(Vec2::new(10.0, 10.0), Vec2::new(0.0, 600.0)), None);
    }

    #[test]
    fn ray_starts_on_the_near_plane_and_looks_forward() {
        // Camera at z = 10 looking down -Z, as Bevy's perspective projection builds it.
        let clip_from_view =
            Mat4::perspective_infinite_reverse_rh(45f32.to_radians(), 4.0 / 3.0, 0.1);
        let world_from_view = Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0));
        let world_from_clip = world_from_view * clip_from_view.inverse();

        let center = ray_through(world_from_clip, Vec2::ZERO).expect("center ray");
        assert!(center.origin.abs_diff_eq(Vec3::new(0.0, 0.0, 9.9), 1e-4));
        assert!(center.direction.as_vec3().abs_diff_eq(Vec3::NEG_Z, 1e-4));

        let right = ray_through(world_from_clip, Vec2::new(1.0, 0.0)).expect("edge ray");
        assert!(right.direction.x > 0.0);
        assert!(right.direction.z < 0.0);

        let top = ray_through(world_from_clip, Vec2::new(0.0, 1.0)).expect("edge ray");
        assert!(top.direction.y > 0.0);
    }

    fn picking_world() -> World {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world
    }

    fn spawn_ball(world: &mut World, center: Vec3, radius: f32) -> (Entity, AssetId<StandardMaterial>) {
        let mesh = world
            .resource_mut::<Assets<Mesh>>()
            .add(Sphere::new(radius).mesh().uv(16, 16));
        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                emissive: LinearRgba::BLACK,
                ..default()
            });
        let material_id = material.id();

        let entity = world
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(center),
                GlobalTransform::from_translation(center),
                Visibility::default(),
                Aabb::from_min_max(Vec3::splat(-radius), Vec3::splat(radius)),
            ))
            .id();
        (entity, material_id)
    }

    fn nearest_along(world: &mut World, ray: Ray3d) -> Option<(Entity, AssetId<StandardMaterial>)> {
        world
            .run_system_once(
                move |mut ray_cast: MeshRayCast,
                      surfaces: Query<&MeshMaterial3d<StandardMaterial>>| {
                    let settings =
                        MeshRayCastSettings::default().with_visibility(RayCastVisibility::Any);
                    nearest_surface(&mut ray_cast, &surfaces, ray, &settings)
                },
            )
            .expect("system runs")
    }

    fn emissive(world: &World, id: AssetId<StandardMaterial>) -> LinearRgba {
        world
            .resource::<Assets<StandardMaterial>>()
            .get(id)
            .map(|material| material.emissive)
            .expect("material")
    }

    #[test]
    fn nearest_hit_wins_when_bodies_line_up() {
        let mut world = picking_world();
        // Spawned far-first so the hit order cannot come from spawn order.
        let (far, _) = spawn_ball(&mut world, Vec3::new(0.0, 0.0, -20.0), 3.0);
        let (near, near_material) = spawn_ball(&mut world, Vec3::ZERO, 1.0);

        let ray = Ray3d::new(Vec3::new(0.0, 0.0, 30.0), Dir3::NEG_Z);
        assert_eq!(nearest_along(&mut world, ray), Some((near, near_material)));

        // Offset past the small ball but inside the big one.
        let ray = Ray3d::new(Vec3::new(2.0, 0.0, 30.0), Dir3::NEG_Z);
        assert_eq!(nearest_along(&mut world, ray).map(|(entity, _)| entity), Some(far));
    }

    #[test]
    fn missing_ray_restores_and_clears_the_highlight() {
        let mut world = picking_world();
        let (ball, material) = spawn_ball(&mut world, Vec3::ZERO, 1.0);
        let mut state = InteractionState::default();

        let hit = nearest_along(&mut world, Ray3d::new(Vec3::new(0.0, 0.0, 30.0), Dir3::NEG_Z));
        state.hover(
            hit,
            &mut world.resource_mut::<Assets<StandardMaterial>>(),
            ATTENTION,
        );
        assert_eq!(state.hovered_entity(), Some(ball));
        assert_eq!(emissive(&world, material), ATTENTION);

        let miss = nearest_along(&mut world, Ray3d::new(Vec3::new(50.0, 0.0, 30.0), Dir3::NEG_Z));
        assert!(miss.is_none());
        state.hover(
            miss,
            &mut world.resource_mut::<Assets<StandardMaterial>>(),
            ATTENTION,
        );
        assert_eq!(state.hovered_entity(), None);
        assert_eq!(emissive(&world, material), LinearRgba::BLACK);
    }
}

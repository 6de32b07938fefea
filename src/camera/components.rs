//! Orbit-style camera control.
use bevy::prelude::*;

/// Pitch limit keeping the camera off the poles, where `look_at` degenerates.
const MAX_PITCH: f32 = 1.54;

/// Keeps the camera aimed at `focus` while drag input orbits it and scroll
/// input zooms towards it.
///
/// Input is only queued by the input systems; [`OrbitCamera::update`] applies
/// it relative to the focus current at commit time.
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pending_rotation: Vec2,
    pending_zoom: f32,
}

impl OrbitCamera {
    pub fn new(focus: Vec3) -> Self {
        Self {
            focus,
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 0.1,
            min_radius: 1.0,
            max_radius: 1000.0,
            pending_rotation: Vec2::ZERO,
            pending_zoom: 0.0,
        }
    }

    pub fn with_sensitivity(mut self, rotate: f32, zoom: f32) -> Self {
        self.rotate_sensitivity = rotate;
        self.zoom_sensitivity = zoom;
        self
    }

    pub fn with_zoom_limits(mut self, min_radius: f32, max_radius: f32) -> Self {
        self.min_radius = min_radius.min(max_radius);
        self.max_radius = max_radius.max(min_radius);
        self
    }

    pub fn set_focus(&mut self, focus: Vec3) {
        self.focus = focus;
    }

    /// Queues a drag delta in pixels.
    pub fn queue_rotation(&mut self, delta: Vec2) {
        self.pending_rotation += delta;
    }

    /// Queues scroll steps; positive values zoom in.
    pub fn queue_zoom(&mut self, steps: f32) {
        self.pending_zoom += steps;
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn has_pending_input(&self) -> bool {
        self.pending_rotation != Vec2::ZERO || self.pending_zoom != 0.0
    }

    /// Commits the focus and any queued input to the camera transform.
    pub fn update(&mut self, transform: &mut Transform) {
        let mut offset = transform.translation - self.focus;
        if offset.length_squared() <= f32::EPSILON {
            offset = Vec3::Z * self.min_radius;
        }

        let radius = offset.length();
        let yaw = offset.x.atan2(offset.z) - self.pending_rotation.x * self.rotate_sensitivity;
        let pitch = ((offset.y / radius).clamp(-1.0, 1.0).asin()
            + self.pending_rotation.y * self.rotate_sensitivity)
            .clamp(-MAX_PITCH, MAX_PITCH);
        let zoom = (1.0 - self.zoom_sensitivity).powf(self.pending_zoom);
        let radius = (radius * zoom).clamp(self.min_radius, self.max_radius);

        let direction = Vec3::new(
            pitch.cos() * yaw.sin(),
            pitch.sin(),
            pitch.cos() * yaw.cos(),
        );
        transform.translation = self.focus + direction * radius;
        transform.look_at(self.focus, Vec3::Y);

        self.pending_rotation = Vec2::ZERO;
        self.pending_zoom = 0.0;
    }
}

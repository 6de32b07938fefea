//! Spin state driven by the animation stepper.
use std::f32::consts::TAU;

use bevy::prelude::*;

/// Fixed per-frame rotation about the local Y axis.
///
/// Attached to body meshes (self spin) and orbit pivots (orbit spin). The
/// accumulated angle is kept in `[0, TAU)` and written to the transform as an
/// absolute rotation, so `n` steps always equal a single rotation of
/// `n * rate mod TAU`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub rate: f32,
    angle: f32,
}

impl Spin {
    pub fn new(rate: f32) -> Self {
        Self { rate, angle: 0.0 }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advances one frame and returns the new rotation.
    pub fn advance(&mut self) -> Quat {
        self.angle = (self.angle + self.rate).rem_euclid(TAU);
        self.rotation()
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_wraps_into_one_turn() {
        let mut spin = Spin::new(3.0);
        spin.advance();
        spin.advance();
        spin.advance();
        assert!((spin.angle() - (9.0 - TAU)).abs() < 1e-5);

        let mut backwards = Spin::new(-0.5);
        backwards.advance();
        assert!((backwards.angle() - (TAU - 0.5)).abs() < 1e-5);
    }
}

//! AnimationPlugin wires the per-frame body stepper.
use bevy::prelude::*;

use crate::{animation::systems::step_bodies, core::FrameStage};

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, step_bodies.in_set(FrameStage::Animate));
    }
}

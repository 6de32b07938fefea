//! Per-frame spin and orbit stepping.
use bevy::prelude::*;

use crate::{
    animation::components::Spin, core::plugin::FrameClock,
    interaction::components::InteractionState,
};

/// Advances every spinning mesh and orbit pivot by one fixed increment.
pub fn step_bodies(
    state: Res<InteractionState>,
    mut clock: ResMut<FrameClock>,
    mut spinners: Query<(&mut Spin, &mut Transform)>,
) {
    if !state.playing {
        return;
    }

    for (mut spin, mut transform) in spinners.iter_mut() {
        transform.rotation = spin.advance();
    }
    clock.record_animation_step();
}
